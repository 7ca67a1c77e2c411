//! `playpen file`: manage project files from the terminal.

use super::args::FileAction;
use crate::log;
use crate::store::{FileKind, FileStore, SharedStorage, StoreError};
use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use std::fs;

pub fn run_file(action: &FileAction, storage: SharedStorage, out: &mut dyn Write) -> Result<()> {
    let mut store = FileStore::load(storage);

    match action {
        FileAction::Ls => {
            for entry in store.list() {
                let marker = if entry.name == store.selected() { '*' } else { ' ' };
                writeln!(out, "{marker} {:<8} {}", entry.kind.label(), entry.name)?;
            }
        }
        FileAction::Show { name } => {
            let file = store
                .get(name)
                .ok_or_else(|| StoreError::NotFound(name.clone()))?;
            out.write_all(file.content.as_bytes())?;
            if !file.content.ends_with('\n') {
                writeln!(out)?;
            }
        }
        FileAction::Add { name, kind, from } => {
            let kind = kind.unwrap_or_else(|| FileKind::from_name(name));
            // Read first so a bad path leaves the store untouched
            let content = from.as_deref().map(read_source).transpose()?;
            store.add(name, kind)?;
            if let Some(content) = content {
                store.update(name, content)?;
            }
            log!("file"; "added {} ({})", name, kind);
        }
        FileAction::Rm { name } => {
            store.delete(name)?;
            log!("file"; "deleted {}", name);
        }
        FileAction::Mv { from, to } => {
            store.rename(from, to)?;
            log!("file"; "renamed {} -> {}", from, to);
        }
        FileAction::Set { name, from } => {
            let content = match from {
                Some(path) => read_source(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            store.update(name, content)?;
            log!("file"; "updated {}", name);
        }
        FileAction::Select { name } => {
            store.select(name)?;
            log!("file"; "selected {}", name);
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
