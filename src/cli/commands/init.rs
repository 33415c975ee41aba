use crate::config::Config;
use crate::db::Store;

pub async fn cmd_init(store: &Store) -> anyhow::Result<()> {
    store.create_schema().await?;
    store.ping().await?;
    println!("✓ Schema ready");
    Ok(())
}

pub fn cmd_init_config() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Created config.toml");
    } else {
        println!("config.toml already exists, left untouched.");
    }
    Ok(())
}
