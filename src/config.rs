use web::config::Config;

const CONFIG_PATH: &str = "config.toml";

pub fn process_config() -> anyhow::Result<Config> {
    let path = std::env::var("LINKSHELF_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());
    Config::load(path, std::env::var("DATABASE_URL").ok())
}
