use serde_json::json;

use crate::cli::open_store;
use crate::error::TaskmanError;
use crate::output;

pub fn run(json_output: bool) -> Result<i32, TaskmanError> {
    let store = open_store()?;
    let counts = store.counts();

    if json_output {
        output::json::print(&output::json::success(json!({
            "counts": output::json::counts_json(&counts)
        })));
    } else {
        output::text::print_counts(&counts);
    }
    Ok(0)
}
