//! Command handlers: one service call each, JSON to stdout.

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;

use depot_core::{CategorySetId, GoodId, WarehouseId};
use depot_infra::{StoreConfig, call_tool, open_file_service, tool_definitions};
use depot_inventory::{AddGood, CategoryAssignment, CreateCategorySet, SetCategoryAssignments};

use crate::Command;

pub(crate) fn run(command: Command, config: &StoreConfig) -> Result<()> {
    let service = open_file_service(config);

    match command {
        Command::Snapshot => print_json(&service.snapshot()),
        Command::AddGood {
            warehouse,
            name,
            quantity,
            unit_weight_kg,
            expiry_date,
            tickets,
        } => {
            let cmd = AddGood {
                warehouse_id: WarehouseId::new(warehouse),
                name,
                quantity,
                unit_weight_kg,
                expiry_date,
                tickets,
            };
            let good = service.add_good(&cmd).context("add good failed")?;
            tracing::info!(
                good_id = %good.id,
                warehouse_id = %good.warehouse_id,
                quantity = good.quantity,
                "good stored"
            );
            print_json(&good)
        }
        Command::CreateCategorySet { name, categories } => {
            let set = service
                .create_category_set(&CreateCategorySet { name, categories })
                .context("create category set failed")?;
            print_json(&set)
        }
        Command::Assign { set_id, pairs } => {
            let assignments = pairs
                .iter()
                .map(|p| parse_assignment(p))
                .collect::<Result<Vec<_>>>()?;
            let summary = service
                .set_category_assignments(&SetCategoryAssignments {
                    category_set_id: CategorySetId::new(set_id),
                    assignments,
                })
                .context("assign categories failed")?;
            print_json(&summary)
        }
        Command::MarkFeature { feature_id } => {
            let state = service.mark_feature_used(&feature_id);
            print_json(&state.used_features)
        }
        Command::Features => print_json(&service.feature_board()),
        Command::Totals => print_json(&service.goods_totals()),
        Command::Expiry { order } => print_json(&service.goods_by_expiry(order)),
        Command::Groups { set_id } => {
            let groups = service
                .category_groups(&CategorySetId::new(set_id.as_str()))
                .ok_or_else(|| anyhow!("category set not found: {set_id}"))?;
            print_json(&groups)
        }
        Command::Goods { warehouse } => {
            let warehouse_id = WarehouseId::new(warehouse);
            if service.state().warehouse(&warehouse_id).is_none() {
                bail!("warehouse not found: {warehouse_id}");
            }
            print_json(&service.warehouse_goods(&warehouse_id))
        }
        Command::Tool { name, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("--args must be a JSON object")?;
            match call_tool(&service, &name, args) {
                Ok(result) => print_json(&result),
                Err(err) => {
                    print_json(&err.to_json())?;
                    Err(err).context(format!("tool {name} failed"))
                }
            }
        }
        Command::Tools => print_json(&tool_definitions()),
    }
}

/// `GOOD_ID=CATEGORY`; the category may itself contain `=`.
fn parse_assignment(raw: &str) -> Result<CategoryAssignment> {
    let (good_id, category) = raw
        .split_once('=')
        .with_context(|| format!("expected GOOD_ID=CATEGORY, got '{raw}'"))?;
    if good_id.trim().is_empty() {
        bail!("missing good id in '{raw}'");
    }
    Ok(CategoryAssignment {
        good_id: GoodId::new(good_id.trim()),
        category: category.to_string(),
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_pairs() {
        let a = parse_assignment("good_1=Not electronic").unwrap();
        assert_eq!(a.good_id, GoodId::new("good_1"));
        assert_eq!(a.category, "Not electronic");

        let a = parse_assignment(" good_2 =a=b").unwrap();
        assert_eq!(a.good_id.as_str(), "good_2");
        assert_eq!(a.category, "a=b");

        assert!(parse_assignment("good_1").is_err());
        assert!(parse_assignment("=Food").is_err());
    }

    #[test]
    fn commands_run_against_a_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::default().with_data_dir(dir.path());

        run(
            Command::AddGood {
                warehouse: "wh-1".to_string(),
                name: "Rice".to_string(),
                quantity: 2.0,
                unit_weight_kg: 1.0,
                expiry_date: "2025-01-01".to_string(),
                tickets: None,
            },
            &config,
        )
        .unwrap();
        run(Command::MarkFeature { feature_id: "stores".to_string() }, &config).unwrap();

        let state = open_file_service(&config).state();
        assert_eq!(state.goods.len(), 1);
        assert!(state.is_feature_used("stores"));

        assert!(run(Command::Groups { set_id: "missing".to_string() }, &config).is_err());
        assert!(run(Command::Goods { warehouse: "wh-99".to_string() }, &config).is_err());
        assert!(
            run(
                Command::Tool { name: "warehouseAddGood".to_string(), args: "{}".to_string() },
                &config
            )
            .is_err()
        );
    }
}
