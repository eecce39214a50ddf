#![deny(unsafe_code)]
//! CLI binary for the glass-fx effects.
//!
//! Subcommands:
//! - `map`: generate a displacement map for a warp and write it as PNG
//! - `simulate <effect>`: run a motion effect for N ticks, print where it ends
//! - `list`: print available effects and warps

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use glass_fx_core::{DisplacementField, Effect, Scene};
use glass_fx_effects::{list_warps, run_scene, snapshot, warp_by_name, EffectKind};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "glass-fx", about = "Glass refraction maps and motion effects")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a displacement map and write it as a PNG.
    Map {
        /// Warp name (e.g. "liquid-glass").
        #[arg(long, default_value = "liquid-glass")]
        warp: String,

        /// Region width in pixels.
        #[arg(short = 'W', long, default_value_t = 120)]
        width: usize,

        /// Region height in pixels.
        #[arg(short = 'H', long, default_value_t = 120)]
        height: usize,

        /// Output file path.
        #[arg(short, long, default_value = "map.png")]
        output: PathBuf,

        /// Also write a magnitude preview to this path.
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Run a motion effect for N ticks and report its final position.
    Simulate {
        /// Effect name (e.g. "bubble").
        effect: String,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        ticks: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Effect parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Fixed pointer position as "x,y".
        #[arg(long)]
        pointer: Option<String>,
    },
    /// List available effects and warps.
    List,
}

/// Parses `"x,y"` into a finite point.
fn parse_pointer(text: &str) -> Result<[f64; 2], CliError> {
    let invalid = || CliError::Input(format!("invalid --pointer {text:?}: expected \"x,y\""));
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok([x, y])
}

fn format_point(p: DVec2) -> String {
    format!("({:.2}, {:.2})", p.x, p.y)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let effects = EffectKind::list_effects();
            let warps = list_warps();
            if cli.json {
                let info = serde_json::json!({
                    "effects": effects,
                    "warps": warps,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Effects:");
                for name in effects {
                    println!("  {name}");
                }
                println!("Warps:");
                println!("  {}", warps.join(", "));
            }
        }
        Command::Map {
            warp,
            width,
            height,
            output,
            preview,
        } => {
            let warp_fn = warp_by_name(&warp)?;
            let field = DisplacementField::generate(width, height, warp_fn)?;
            let map = field.encode();

            snapshot::write_map_png(&map, &output)?;
            if let Some(path) = &preview {
                snapshot::write_preview_png(&field, path)?;
            }

            if cli.json {
                let info = serde_json::json!({
                    "warp": warp,
                    "width": width,
                    "height": height,
                    "max_scale": field.max_scale(),
                    "output": output.display().to_string(),
                    "preview": preview.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "generated {warp} ({width}x{height}, max_scale {:.3}) -> {}",
                    field.max_scale(),
                    output.display()
                );
            }
        }
        Command::Simulate {
            effect,
            width,
            height,
            ticks,
            seed,
            params,
            pointer,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let mut scene = Scene::new(&effect, width, height, seed);
            scene.params = params;
            scene.ticks = ticks;
            scene.pointer = pointer.as_deref().map(parse_pointer).transpose()?;

            let finished = run_scene(&scene)?;
            let position = finished.position();

            if cli.json {
                let info = serde_json::json!({
                    "scene": scene,
                    "position": [position.x, position.y],
                    "params": finished.params(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{effect} after {ticks} ticks ({width}x{height}, seed {seed}): {}",
                    format_point(position)
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_parses_with_spaces() {
        assert_eq!(parse_pointer("10,20").ok(), Some([10.0, 20.0]));
        assert_eq!(parse_pointer(" 1.5 , -3 ").ok(), Some([1.5, -3.0]));
    }

    #[test]
    fn malformed_pointer_is_input_error() {
        for bad in ["", "10", "10;20", "a,b", "inf,0"] {
            let err = parse_pointer(bad).unwrap_err();
            assert_eq!(err.exit_code(), 12, "{bad:?}");
        }
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "glass-fx", "--json", "simulate", "bubble", "-W", "800", "--ticks", "5",
            "--pointer", "1,2",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Simulate {
                effect,
                width,
                height,
                ticks,
                pointer,
                ..
            } => {
                assert_eq!(effect, "bubble");
                assert_eq!((width, height, ticks), (800, 720, 5));
                assert_eq!(pointer.as_deref(), Some("1,2"));
            }
            _ => panic!("expected simulate"),
        }
    }

    fn exit_code_of(args: &[&str]) -> i32 {
        let cli = Cli::try_parse_from(args).unwrap();
        run(cli).unwrap_err().exit_code()
    }

    #[test]
    fn documented_exit_codes_for_rejected_requests() {
        assert_eq!(exit_code_of(&["glass-fx", "map", "--warp", "fisheye"]), 10);
        assert_eq!(exit_code_of(&["glass-fx", "map", "-W", "0"]), 10);
        assert_eq!(exit_code_of(&["glass-fx", "simulate", "nope"]), 10);
        assert_eq!(
            exit_code_of(&["glass-fx", "simulate", "bubble", "--params", "{bad"]),
            12
        );
        assert_eq!(
            exit_code_of(&["glass-fx", "simulate", "bubble", "--pointer", "1;2"]),
            12
        );
    }
}
