//! `cenphone catalog` - print the phone catalog.

use cenphone_storefront::Result;
use cenphone_storefront::services::catalog;

/// Print every brand, its models, and the configuration options.
#[allow(clippy::print_stdout)]
pub fn run() -> Result<()> {
    for brand in catalog::CATALOG {
        println!("{}", brand.name);
        for model in brand.models {
            println!("  {} - {}", model.name, model.base_price);
            println!("    storage: {}", model.storage_options.join(", "));
            println!("    colors:  {}", model.colors.join(", "));
        }
        println!();
    }

    Ok(())
}
