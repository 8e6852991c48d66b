//! Positional selection over a staged media listing.

use hashbrown::HashMap;

use crate::eval::eval_node::OutputMap;
use crate::eval::graph_runtime::GraphRuntime;
use crate::types::{NodeSpec, Value};

pub(crate) fn eval_media_cycle(rt: &mut GraphRuntime, spec: &NodeSpec) -> Result<OutputMap, String> {
    let params = &spec.params;
    let library = params.media.as_deref().and_then(|name| rt.media.get(name));

    let Some(library) = library else {
        log::warn!("node {}: no media listing staged", spec.id);
        return Ok(empty_outputs("no media staged"));
    };
    if library.is_empty() {
        return Ok(empty_outputs("no media files"));
    }

    let total = library.len();
    let index = if params.wrap {
        params.index % total
    } else {
        params.index.min(total - 1)
    };
    let path = &library.files()[index];
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut outputs: OutputMap = HashMap::new();
    outputs.insert(
        "path".to_string(),
        Value::Text(path.to_string_lossy().into_owned()),
    );
    outputs.insert("file_name".to_string(), Value::Text(file_name));
    outputs.insert("index".to_string(), Value::Int(index as i64));
    outputs.insert("total".to_string(), Value::Int(total as i64));
    outputs.insert(
        "summary".to_string(),
        Value::Text(format!("media: {} of {}", index + 1, total)),
    );
    Ok(outputs)
}

fn empty_outputs(summary: &str) -> OutputMap {
    let mut outputs: OutputMap = HashMap::new();
    outputs.insert("path".to_string(), Value::text(""));
    outputs.insert("file_name".to_string(), Value::text(""));
    outputs.insert("index".to_string(), Value::Int(0));
    outputs.insert("total".to_string(), Value::Int(0));
    outputs.insert("summary".to_string(), Value::text(summary));
    outputs
}
