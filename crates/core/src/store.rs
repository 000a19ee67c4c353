//! JSON and markdown artifact persistence.

use crate::error::{Error, Result};
use crate::types::{CombinedStore, DeckRecord, KeyInformation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a value as 2-space indented JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| Error::json(path, e))?;
    writer.flush().map_err(|e| Error::io(path, e))
}

/// Read a JSON document into a value.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::json(path, e))
}

pub fn save_deck(path: &Path, deck: &DeckRecord) -> Result<()> {
    write_json(path, deck)
}

pub fn load_deck(path: &Path) -> Result<DeckRecord> {
    read_json(path)
}

pub fn save_combined(path: &Path, store: &CombinedStore) -> Result<()> {
    write_json(path, store)
}

pub fn load_combined(path: &Path) -> Result<CombinedStore> {
    read_json(path)
}

pub fn save_key_information(path: &Path, info: &KeyInformation) -> Result<()> {
    write_json(path, info)
}

pub fn load_key_information(path: &Path) -> Result<KeyInformation> {
    read_json(path)
}

/// Write rendered markdown.
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report).map_err(|e| Error::io(path, e))
}
