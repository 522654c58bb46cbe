use clap::Subcommand;
use readtimer_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one config value by dot-separated key
    Get {
        /// Key, e.g. `timer.session_minutes`
        key: String,
    },
    /// Set a config value
    Set {
        /// Key, e.g. `timer.session_minutes`
        key: String,
        /// New value
        value: String,
    },
    /// Print the whole configuration
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
