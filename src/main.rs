#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use netglow::FieldConfig;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match FieldConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => FieldConfig::default(),
    };

    if let Err(e) = netglow::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

// The browser host is a library entry point (`netglow::web`)
#[cfg(target_arch = "wasm32")]
fn main() {}
