// src/main.rs
//
// Calculatrice scientifique — point d’entrée ligne de commande
// ------------------------------------------------------------
// - avec arguments : chaque argument est une expression, un résultat par ligne
// - sans argument  : lecture ligne par ligne sur stdin (mode interactif)
//   commandes : :hist (historique), :clear (AC), :quit
//
// Journalisation : RUST_LOG (ex: RUST_LOG=calculatrice_sci=debug), défaut "warn".

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calculatrice_sci::reglages::Reglages;
use calculatrice_sci::session::Session;

#[derive(Parser)]
#[command(name = "calculatrice")]
#[command(about = "Calculatrice scientifique (jetons -> arbre -> f64)", long_about = None)]
struct Cli {
    /// Expressions à évaluer (sinon : lecture sur stdin)
    expressions: Vec<String>,

    /// Affiche la démarche (jetons, arbre lu, valeur brute)
    #[arg(long)]
    demarche: bool,

    /// Fichier de réglages (défaut : <config>/calculatrice/reglages.toml)
    #[arg(long, value_name = "FICHIER")]
    config: Option<PathBuf>,

    /// Écrit les réglages courants dans le fichier puis quitte
    #[arg(long)]
    ecrire_reglages: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let reglages = Reglages::charger(cli.config.as_deref());

    if cli.ecrire_reglages {
        let chemin = cli.config.clone().unwrap_or_else(Reglages::chemin_defaut);
        return match reglages.enregistrer(&chemin) {
            Ok(()) => {
                println!("{}", chemin.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut session = Session::new(&reglages);

    if !cli.expressions.is_empty() {
        for expr in &cli.expressions {
            afficher(&mut session, expr, cli.demarche);
        }
        return ExitCode::SUCCESS;
    }

    match boucle(&mut session, cli.demarche) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/* ------------------------ Mode interactif ------------------------ */

fn boucle(session: &mut Session, demarche: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    for ligne in stdin.lock().lines() {
        let ligne = ligne?;
        match ligne.trim() {
            ":quit" | ":q" => break,
            ":clear" => session.reset_total(),
            ":hist" => {
                for h in session.historique() {
                    writeln!(out, "{} = {}", h.expression, h.resultat)?;
                }
            }
            "" => {}
            expr => afficher(session, expr, demarche),
        }
        out.flush()?;
    }
    Ok(())
}

fn afficher(session: &mut Session, expr: &str, demarche: bool) {
    if !demarche {
        println!("{}", session.evaluer(expr));
        return;
    }
    let (res, d) = session.evaluer_detaille(expr);
    match d {
        Ok(d) => {
            println!("  jetons : {}", d.jetons);
            println!("  arbre  : {} ({} noeuds)", d.arbre, d.noeuds);
            println!("  valeur : {:?}", d.valeur);
        }
        Err(e) => println!("  {e}"),
    }
    println!("{res}");
}
