use std::env;
use std::path::PathBuf;

use layers::Theme;
use serde::Serialize;
use tools::{Session, load_config, read_json, run_fit, run_markers, run_replay};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "fit" => cmd_fit(args),
        "markers" => cmd_markers(args),
        "replay" => cmd_replay(args),
        _ => Err(usage()),
    }
}

struct CommonArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    no_overlay: bool,
    theme: Option<String>,
}

fn parse_common(args: &[String], render_flags: bool) -> Result<CommonArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut no_overlay = false;
    let mut theme: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("--config requires a value".to_string());
                }
                config = Some(PathBuf::from(&args[i]));
            }
            "--no-overlay" if render_flags => no_overlay = true,
            "--theme" if render_flags => {
                i += 1;
                if i >= args.len() {
                    return Err("--theme requires a value".to_string());
                }
                theme = Some(args[i].clone());
            }
            s if s.starts_with('-') => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            _ => {
                if input.is_some() {
                    return Err(format!("unexpected arg: {}\n\n{}", args[i], usage()));
                }
                input = Some(PathBuf::from(&args[i]));
            }
        }
        i += 1;
    }

    let input = input.ok_or_else(usage)?;
    Ok(CommonArgs {
        input,
        config,
        no_overlay,
        theme,
    })
}

fn cmd_fit(args: Vec<String>) -> Result<(), String> {
    // meshmap fit <snapshot.json> [--config cfg.json]
    let args = parse_common(&args, false)?;
    let config = load_config(args.config.as_deref())?;
    let snapshot = read_json(&args.input)?;
    print_json(&run_fit(snapshot, config))
}

fn cmd_markers(args: Vec<String>) -> Result<(), String> {
    // meshmap markers <snapshot.json> [--config cfg.json] [--no-overlay] [--theme light|dark]
    let args = parse_common(&args, true)?;
    let mut config = load_config(args.config.as_deref())?;
    if args.no_overlay {
        config.overlay_visible = false;
    }
    if let Some(theme) = &args.theme {
        config.theme = Theme::from_str(theme);
    }
    let snapshot = read_json(&args.input)?;
    print_json(&run_markers(snapshot, config))
}

fn cmd_replay(args: Vec<String>) -> Result<(), String> {
    // meshmap replay <session.json> [--config cfg.json]
    let args = parse_common(&args, false)?;
    let config = load_config(args.config.as_deref())?;
    let session: Session = read_json(&args.input)?;
    print_json(&run_replay(session, config))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| format!("encode output: {e}"))?;
    println!("{out}");
    Ok(())
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "meshmap".to_string());
    format!(
        "Usage:\n  {exe} fit <snapshot.json> [--config cfg.json]\n  {exe} markers <snapshot.json> [--config cfg.json] [--no-overlay] [--theme light|dark]\n  {exe} replay <session.json> [--config cfg.json]\n\nNotes:\n- A snapshot is {{\"nodes\": [...], \"waypoints\": [...]}} with positions in 1e-7 degrees.\n- A session is {{\"snapshot\": ..., \"events\": [...]}}; events are replayed in order.\n- Set RUST_LOG=debug to trace camera and selection decisions on stderr.\n"
    )
}
