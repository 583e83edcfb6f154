// src/journal.rs
//
// Journalisation console (natif seulement).
// - niveau par défaut : info
// - RUST_LOG pour affiner (ex: RUST_LOG=calculatrice_sci=debug pour voir jetons + RPN)

use eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

pub fn init_journal() -> Result<()> {
    let filtre = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_target(true)
        .try_init()
        .map_err(|e| eyre!("journalisation déjà initialisée: {e}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "journal prêt");
    Ok(())
}
