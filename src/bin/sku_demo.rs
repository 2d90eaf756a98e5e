/// SKU engine demo
///
/// Loads a JSON catalog, restores a selection from the value ids given on the
/// command line and prints which values remain selectable plus the resolved
/// price/stock.
///
/// Usage: sku_demo <catalog.json> [value-id ...]
/// Set SKU_CONFIG to a TOML file to override engine limits.

use anyhow::{bail, Context, Result};
use sku_engine::{SkuCatalog, SkuConfig, SkuEngine, ValueId};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,sku_engine=debug"))
        .init();

    let mut args = std::env::args().skip(1);
    let catalog_path = match args.next() {
        Some(path) => path,
        None => bail!("usage: sku_demo <catalog.json> [value-id ...]"),
    };
    let value_ids = args
        .map(|arg| arg.parse::<ValueId>().with_context(|| format!("invalid value id '{}'", arg)))
        .collect::<Result<Vec<_>>>()?;

    let config = match std::env::var("SKU_CONFIG") {
        Ok(path) => SkuConfig::load(&path).with_context(|| format!("loading config {}", path))?,
        Err(_) => SkuConfig::default(),
    };

    let catalog: SkuCatalog<String> =
        SkuCatalog::load(&catalog_path).with_context(|| format!("loading catalog {}", catalog_path))?;

    let mut engine = SkuEngine::new(config);
    engine.initialize_from_catalog(catalog)?;
    engine.auto_select_attr(&value_ids);

    println!("=== SKU Engine Demo ===\n");
    println!("Table: {} complete combinations, {} entries", engine.table().complete_len(), engine.table().len());
    println!("Selected: {:?}\n", engine.selected_value_ids());

    let selected = engine.selection().clone();
    for dimension in engine.refresh_state_data() {
        println!("{} ({})", dimension.name, dimension.id);
        for value in &dimension.values {
            let marker = if selected.is_selected(dimension.id, value.id) { "*" } else { " " };
            let state = if value.is_selectable() { "selectable" } else { "sold out" };
            println!("  {} {:>6} {:<12} {}", marker, value.id, value.label, state);
        }
    }

    println!();
    match engine.get_model() {
        Some(model) if model.is_aggregate() => {
            match model.available_price_range() {
                Some((low, high)) => {
                    println!("Partial selection: {} in stock, price {:.2} - {:.2}", model.stock, low, high)
                }
                None => println!("Partial selection: sold out"),
            }
            let pending: Vec<&str> = engine.unselected_dimensions().into_iter().map(|d| d.name.as_str()).collect();
            println!("Still to choose: {}", pending.join(", "));
        }
        Some(model) => {
            println!(
                "SKU {}: {} in stock at {:.2}",
                model.payload.as_deref().unwrap_or("-"),
                model.stock,
                model.price
            );
        }
        None => println!("Nothing selected"),
    }

    Ok(())
}
