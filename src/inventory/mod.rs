//inventory/mod.rs
//
//serde view of the YAML inventory file. Each top-level key names a VM; the
//entries are turned into fleet records once parsed.
use serde::{Serialize, Deserialize};
use crate::error::{FleetError, Result};
use crate::fleet::machines::{Tag, VirtualMachine};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub type Inventory = BTreeMap<String, VirtualMachine>;

/// Missing keys fall back to empty strings, zero sizes and no tags
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct VmEntry {

    pub ip: String,
    pub hostname: String,
    pub diskgb: i64,
    pub ram: i64,
    pub status: String,
    pub tags: Vec<TagEntry>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct TagEntry {

    #[serde(rename = "tagName")]
    pub tag_name: String,
    #[serde(rename = "tagValue")]
    pub tag_value: String,
}

impl From<VmEntry> for VirtualMachine {
    // resource_group is never read from the file, only set by association
    fn from(entry: VmEntry) -> Self {
        VirtualMachine {
            hostname: entry.hostname,
            ip: entry.ip,
            disk_gb: entry.diskgb,
            ram_gb: entry.ram,
            status: entry.status,
            resource_group: None,
            tags: entry.tags.into_iter().map(|t| Tag::new(&t.tag_name, &t.tag_value)).collect(),
        }
    }
}

/// Parses raw YAML into the inventory. `source_name` only shows up in error messages.
pub fn parse_inventory(bytes: &[u8], source_name: &str) -> Result<Inventory> {

    // serde_yaml refuses a document with no node in it, but an empty inventory is still valid
    if !has_content(&String::from_utf8_lossy(bytes)) {
        return Ok(Inventory::new());
    }

    // a bare `~` document is null rather than a mapping
    let entries: Option<BTreeMap<String, VmEntry>> = serde_yaml::from_slice(bytes).map_err(|e| FleetError::Parse {
        source_name: source_name.to_string(),
        source: e,
    })?;
    Ok(entries.unwrap_or_default().into_iter().map(|(name, entry)| (name, VirtualMachine::from(entry))).collect())
}

/// False when the text only holds blank lines, comments and document markers
fn has_content(text: &str) -> bool {
    text.lines()
        .map(|l| l.trim())
        .any(|l| !(l.is_empty() || l.starts_with('#') || l == "---" || l == "..."))
}

pub fn load_inventory<P: AsRef<Path>>(path: P) -> Result<Inventory> {
    let path = path.as_ref();
    let display = path.to_string_lossy().to_string();
    let bytes = fs::read(path).map_err(|e| FleetError::Io { path: display.clone(), source: e })?;
    parse_inventory(&bytes, &display)
}
