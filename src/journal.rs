// src/journal.rs
//
// Journal : tracing-subscriber vers un fichier (sans couleurs).
// Le niveau vient des réglages (déjà normalisé).

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::Reglages;

pub fn init(reglages: &Reglages) -> anyhow::Result<()> {
    if let Some(dossier) = reglages.log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dossier)
            .with_context(|| format!("création du dossier {}", dossier.display()))?;
    }

    let fichier = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&reglages.log_file)
        .with_context(|| format!("ouverture du journal {}", reglages.log_file.display()))?;

    let filtre = EnvFilter::try_new(&reglages.log_level)
        .with_context(|| format!("niveau de journal invalide: {}", reglages.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(Mutex::new(fichier))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("journal déjà initialisé: {e}"))
}
