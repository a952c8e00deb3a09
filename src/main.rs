// src/main.rs
//
// Calculatrice RPN — point d’entrée terminal
// ------------------------------------------
// - arguments présents : une seule évaluation, résultat sur stdout
// - sinon              : session ligne à ligne sur l’entrée standard
//
// Réglages (config.rs) puis journal (journal.rs) avant tout calcul.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

mod app;
mod config;
mod journal;

use app::AppCalc;
use config::{ChoixRegistre, Reglages};

/// Titre unique (aide + journal).
const TITRE_APP: &str = "Calculatrice RPN";

#[derive(Parser, Debug)]
#[command(name = "calculatrice_rpn", version, about = TITRE_APP)]
struct Args {
    /// Expression à évaluer (sinon : session sur l’entrée standard)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,

    /// Décimales affichées pour un développement infini
    #[arg(long)]
    digits: Option<usize>,

    /// Quatre opérations seulement (sans % ni !)
    #[arg(long)]
    base: bool,

    /// Affiche les jetons et la RPN sous le résultat
    #[arg(long)]
    demarche: bool,

    /// Liste les touches disponibles puis quitte
    #[arg(long)]
    symboles: bool,

    /// Fichier de réglages TOML
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut reglages = Reglages::charger(args.config.as_deref())?;
    if let Some(d) = args.digits {
        reglages.digits = d;
    }
    if args.base {
        reglages.registre = ChoixRegistre::Base;
    }
    reglages.normaliser();

    // Journal indisponible : on calcule quand même.
    if let Err(e) = journal::init(&reglages) {
        eprintln!("journal indisponible : {e:#}");
    }
    info!(
        titre = TITRE_APP,
        registre = ?reglages.registre,
        digits = reglages.digits,
        "initialisation"
    );

    let mut app = AppCalc::new(reglages.registre.construire(), reglages.digits);
    app.afficher_demarche = args.demarche;

    if args.symboles {
        println!("{}", app.rendu_symboles());
        return Ok(ExitCode::SUCCESS);
    }

    if !args.expression.is_empty() {
        app.entree = args.expression.join(" ");
        app.eval_via_noyau();
        if app.en_erreur() {
            eprintln!("{}", app.rendu());
            return Ok(ExitCode::FAILURE);
        }
        println!("{}", app.rendu());
        return Ok(ExitCode::SUCCESS);
    }

    let stdin = io::stdin();
    let interactif = stdin.is_terminal();
    app::session(&mut app, stdin.lock(), io::stdout().lock(), interactif)?;

    Ok(ExitCode::SUCCESS)
}
