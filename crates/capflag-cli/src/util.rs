use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use capflag_engine::Layout;
use capflag_evaluator::weights::ModeWeights;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

pub fn save_json<T, P>(value: &T, path: P) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    Ok(())
}

/// Reads a layout file, or returns the built-in layout when `path` is `None`.
pub fn read_layout(path: Option<&Path>) -> anyhow::Result<Layout> {
    let Some(path) = path else {
        return Ok(Layout::default_capture());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
    let layout = Layout::parse(&text)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))?;
    Ok(layout)
}

/// Reads weight tables, rejecting unknown feature names.
pub fn read_weights_file(path: &Path) -> anyhow::Result<ModeWeights> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights file: {}", path.display()))?;
    let weights = ModeWeights::from_json(&text)
        .with_context(|| format!("Failed to parse weights file: {}", path.display()))?;
    Ok(weights)
}
