//! Category listing command

use anyhow::Result;
use stockpile_core::AssetCategory;

pub fn run() -> Result<()> {
    println!("{} categories:\n", AssetCategory::COUNT);
    for category in AssetCategory::ALL {
        let note = if category.is_workspace() {
            "  (activated one by one)"
        } else {
            ""
        };
        println!(
            "  {:<12} {:<12} [{}]{}",
            category.id(),
            category.label(),
            category.icon(),
            note
        );
    }
    Ok(())
}
