use crate::output::{print_json, print_table};
use promote_core::PromotionChoice;

pub fn run(json: bool) -> anyhow::Result<()> {
    let choices = PromotionChoice::all();

    if json {
        let items: Vec<serde_json::Value> = choices
            .iter()
            .map(|c| {
                let (from, to) = c.channels();
                serde_json::json!({
                    "choice": c.as_str(),
                    "from_channel": from,
                    "to_channel": to,
                })
            })
            .collect();
        return print_json(&items);
    }

    let rows = choices
        .iter()
        .map(|c| {
            let (from, to) = c.channels();
            vec![c.to_string(), from.to_string(), to.to_string()]
        })
        .collect();
    print_table(&["CHOICE", "FROM", "TO"], rows);
    Ok(())
}
