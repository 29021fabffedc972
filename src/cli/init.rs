use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{save_settings, Settings};
use crate::store::Ledger;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let settings = match data_dir {
        Some(dir) => Settings { data_dir: dir },
        None => Settings::default(),
    };
    save_settings(&settings)?;

    let dir = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&dir)?;
    let ledger_file = dir.join("penny.json");
    if !ledger_file.exists() {
        Ledger::default().save(&ledger_file)?;
    }

    println!("Penny initialized. Ledger: {}", ledger_file.display());
    Ok(())
}
