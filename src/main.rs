//! ygofm CLI - Command-line tool for Yu-Gi-Oh! Forbidden Memories data.
//!
//! Reads and writes whole files; all decoding and patching lives in the
//! library crates.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ygofm::data::{DROP_DENOMINATOR, Password};
use ygofm::patch::{reverse_rules, PatchState};
use ygofm::prelude::*;

/// ygofm - Forbidden Memories card database and disc patcher
#[derive(Parser)]
#[command(name = "ygofm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The two images the card database is decoded from.
#[derive(Args)]
struct GameFiles {
    /// Path to the game executable (SLUS_014.11)
    #[arg(short, long, env = "YGOFM_EXECUTABLE")]
    executable: PathBuf,

    /// Path to the resource archive (WA_MRG.MRG)
    #[arg(short, long, env = "YGOFM_ARCHIVE")]
    archive: PathBuf,

    /// Also load opponent slot 0
    #[arg(long)]
    include_placeholder: bool,
}

impl GameFiles {
    fn load(&self) -> Result<GameData> {
        let start = Instant::now();
        let config = ExtractConfig::default().with_placeholder_opponent(self.include_placeholder);
        let data = GameData::open(&self.executable, &self.archive, config)
            .context("Failed to load game data")?;

        info!(
            cards = data.cards().len(),
            opponents = data.opponents().len(),
            elapsed = ?start.elapsed(),
            "loaded game data"
        );
        for report in [data.executable_report(), data.archive_report()] {
            for table in &report.tables {
                debug!("{}", table);
            }
        }
        Ok(data)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List cards, optionally filtered
    Cards {
        #[command(flatten)]
        files: GameFiles,

        /// Case-insensitive match on id, name, ATK/DEF or description
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show one card with its drop sources and equips
    Card {
        #[command(flatten)]
        files: GameFiles,

        /// Card id (1-722)
        id: usize,
    },

    /// Show an opponent's deck and drop tables
    Opponent {
        #[command(flatten)]
        files: GameFiles,

        /// Opponent id
        id: usize,
    },

    /// Export the decoded database as JSON
    Export {
        #[command(flatten)]
        files: GameFiles,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Apply patches to a disc image
    Patch {
        /// Path to the disc image
        #[arg(short, long, env = "YGOFM_IMAGE")]
        image: PathBuf,

        /// Patch groups to apply (default: all)
        #[arg(short, long = "group")]
        groups: Vec<PatchGroup>,

        /// Drop rate written by the variable drop-rate rules (100 or 1000)
        #[arg(long, default_value = "100")]
        drop_rate: DropRateMode,

        /// Extra signature rule, NAME=ORIGINAL:REPLACEMENT in hex
        #[arg(long = "signature", value_parser = parse_signature_rule)]
        signatures: Vec<PatchRule>,

        /// Extra address rule, NAME=ADDRESS:REPLACEMENT (address in hex)
        #[arg(long = "address", value_parser = parse_address_rule)]
        addresses: Vec<PatchRule>,

        /// Re-apply patches that are already present
        #[arg(long)]
        force: bool,

        /// Only report what would change
        #[arg(long)]
        dry_run: bool,

        /// After patching, undo these rules into a separate copy
        #[arg(long)]
        reverse: Vec<String>,

        /// After patching, undo every applied rule into a separate copy
        #[arg(long, conflicts_with = "reverse")]
        reverse_all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "ygofm=debug" } else { "ygofm=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    match cli.command {
        Commands::Cards { files, filter } => cmd_cards(&files, filter.as_deref())?,
        Commands::Card { files, id } => cmd_card(&files, id)?,
        Commands::Opponent { files, id } => cmd_opponent(&files, id)?,
        Commands::Export { files, output } => cmd_export(&files, &output)?,
        Commands::Patch {
            image,
            groups,
            drop_rate,
            signatures,
            addresses,
            force,
            dry_run,
            reverse,
            reverse_all,
        } => {
            let options = PatchOptions {
                force,
                drop_rate_mode: drop_rate,
                groups: if groups.is_empty() {
                    PatchGroup::BUILT_IN.to_vec()
                } else {
                    groups
                },
            };
            let mut engine = PatchEngine::from_options(&options)?;
            for rule in signatures.into_iter().chain(addresses) {
                engine.add_rule(rule);
            }

            if dry_run {
                cmd_patch_inspect(&engine, &image)?;
            } else {
                let selection = if reverse_all {
                    Some(ReverseSelection::All)
                } else if reverse.is_empty() {
                    None
                } else {
                    Some(ReverseSelection::Names(reverse))
                };
                cmd_patch(&engine, &image, selection)?;
            }
        }
    }

    Ok(())
}

fn cmd_cards(files: &GameFiles, filter: Option<&str>) -> Result<()> {
    let data = files.load()?;
    let cards = data.search(filter.unwrap_or(""));

    for card in &cards {
        let stats = card.attack_defense().unwrap_or_else(|| "-".to_string());
        let card_type = card
            .stats
            .map(|s| data.type_name(s.card_type))
            .unwrap_or_default();
        println!("{:03}  {:<30} {:>11}  {}", card.id, card.name, stats, card_type);
    }

    println!("\nTotal: {} cards", cards.len());

    Ok(())
}

fn cmd_card(files: &GameFiles, id: usize) -> Result<()> {
    let data = files.load()?;
    let card = data.card(id)?;

    println!("#{:03} {}", card.id, card.name);
    if let Some(stats) = card.stats {
        println!("Type: {}", data.type_name(stats.card_type));
        println!("ATK/DEF: {}/{}", stats.attack, stats.defense);
        println!(
            "Guardian Stars: {} / {}",
            data.guardian_star_name(stats.guardian_star_1),
            data.guardian_star_name(stats.guardian_star_2)
        );
    }
    if let Some(level) = card.level {
        println!(
            "Level: {}  Attribute: {}",
            level.level,
            data.attribute_name(level.attribute)
        );
    }
    if let Some(password) = card.password {
        match password.password {
            Password::Code(_) => println!("Password: {}  Cost: {}", password.password, password.cost),
            Password::None => println!("Password: none  Cost: {}", password.cost),
        }
    }
    println!("\n{}\n", card.description);

    for tier in DropTier::ALL {
        let sources: Vec<_> = data.drop_index().sources_in(card.id, tier).collect();
        if sources.is_empty() {
            continue;
        }
        println!("{} drops:", tier);
        for source in sources {
            println!(
                "  {:<24} {:>4}/{}",
                data.opponent_name(source.opponent),
                source.chance,
                DROP_DENOMINATOR
            );
        }
    }

    let equips = data.equips_for(card.id);
    if !equips.is_empty() {
        println!("Equips:");
        for &equip in equips {
            let name = data
                .card(usize::from(equip))
                .map(|c| c.name.clone())
                .unwrap_or_else(|_| format!("Unknown_{}", equip));
            println!("  {:03} {}", equip, name);
        }
    }

    Ok(())
}

fn cmd_opponent(files: &GameFiles, id: usize) -> Result<()> {
    let data = files.load()?;
    let opponent = data.opponent(id)?;

    println!("#{:02} {}", opponent.id, opponent.name);

    let card_name = |card_id: usize| {
        data.card(card_id)
            .map(|c| c.name.as_str())
            .unwrap_or("?")
    };

    println!("\nDeck ({} cards):", opponent.deck.len());
    for entry in opponent.deck.iter() {
        println!("  {:03} {:<30} {:>4}", entry.card_id, card_name(entry.card_id), entry.weight);
    }

    for tier in DropTier::ALL {
        let table = opponent.drops(tier);
        println!("\n{} drops ({} cards):", tier, table.len());
        for entry in table.iter() {
            println!(
                "  {:03} {:<30} {:>4}/{}",
                entry.card_id,
                card_name(entry.card_id),
                entry.weight,
                DROP_DENOMINATOR
            );
        }
    }

    Ok(())
}

fn cmd_export(files: &GameFiles, output: &Path) -> Result<()> {
    let data = files.load()?;

    let cards: Vec<_> = data
        .cards()
        .iter()
        .map(|card| {
            serde_json::json!({
                "card": card,
                "type": card.stats.map(|s| data.type_name(s.card_type)),
                "equips": data.equips_for(card.id),
                "drops": data.drop_index().sources(card.id),
            })
        })
        .collect();

    let document = serde_json::json!({
        "version": ygofm::VERSION,
        "cards": cards,
        "opponents": data.opponents(),
    });

    let json = serde_json::to_string_pretty(&document).context("Failed to serialize JSON")?;
    write_atomic(output, json.as_bytes())?;

    println!("Exported {} cards to {}", data.cards().len(), output.display());

    Ok(())
}

fn cmd_patch_inspect(engine: &PatchEngine, image_path: &Path) -> Result<()> {
    let image = read_with_spinner(image_path)?;
    println!("Image: {} (crc32c {})", image_path.display(), crc::fingerprint(&image));

    for inspection in engine.inspect(&image) {
        println!("{}", inspection);
        if let PatchState::Unapplied { locations } | PatchState::Applied { locations } =
            &inspection.state
        {
            for location in locations {
                debug!(rule = %inspection.rule, location, "match");
            }
        }
    }

    Ok(())
}

/// Which logged patches `--reverse` undoes.
enum ReverseSelection {
    All,
    Names(Vec<String>),
}

fn cmd_patch(
    engine: &PatchEngine,
    image_path: &Path,
    reverse: Option<ReverseSelection>,
) -> Result<()> {
    let mut image = read_with_spinner(image_path)?;
    println!("Image: {} (crc32c {})", image_path.display(), crc::fingerprint(&image));

    let start = Instant::now();
    let report = engine.apply(&mut image);
    print!("{}", report);
    println!(
        "Applied {} change(s) in {:?}",
        report.applied_count(),
        start.elapsed()
    );

    if report.has_errors() {
        eprintln!("{} rule(s) failed; the output still contains every other change", report.errors().count());
    }
    if !report.changed() {
        println!("Nothing to write");
        return Ok(());
    }

    let patched_path = output_path(image_path, "Patched");
    write_atomic(&patched_path, &image)?;
    println!(
        "Patched image: {} (crc32c {})",
        patched_path.display(),
        crc::fingerprint(&image)
    );
    drop(image);

    let Some(selection) = reverse else {
        return Ok(());
    };

    let names: Vec<String> = match selection {
        ReverseSelection::All => report.log.rule_names().into_iter().map(String::from).collect(),
        ReverseSelection::Names(names) => names,
    };
    let known = report.log.rule_names();
    if let Some(unknown) = names.iter().find(|n| !known.contains(&n.as_str())) {
        bail!("No applied patch named '{}' (applied: {})", unknown, known.join(", "));
    }

    let mut reloaded = read_with_spinner(&patched_path)?;
    let reversal = reverse_rules(&mut reloaded, &report.log, &names);
    print!("{}", reversal);

    let reversed_path = output_path(image_path, "Reversed");
    write_atomic(&reversed_path, &reloaded)?;
    println!(
        "Reversed image: {} (crc32c {})",
        reversed_path.display(),
        crc::fingerprint(&reloaded)
    );

    Ok(())
}

fn read_with_spinner(path: &Path) -> Result<Vec<u8>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message(format!("Reading {}", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    spinner.finish_and_clear();
    Ok(data)
}

/// `<stem>_<suffix>.<ext>` next to `input`.
fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}_{}", stem, suffix),
    };
    input.with_file_name(name)
}

/// Write through a temporary file in the target directory, then rename, so a
/// failed write never leaves a partial file at `path`.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(data)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

fn parse_signature_rule(arg: &str) -> std::result::Result<PatchRule, String> {
    let (name, original, replacement) = split_rule(arg)?;
    PatchRule::signature_hex(name, PatchGroup::Custom, original, replacement).map_err(|e| e.to_string())
}

fn parse_address_rule(arg: &str) -> std::result::Result<PatchRule, String> {
    let (name, address, replacement) = split_rule(arg)?;
    let digits = address.trim().trim_start_matches("0x").trim_start_matches("0X");
    let address = usize::from_str_radix(digits, 16)
        .map_err(|e| format!("invalid address '{}': {}", address, e))?;
    PatchRule::address_hex(name, PatchGroup::Custom, address, replacement).map_err(|e| e.to_string())
}

/// Split `NAME=LEFT:RIGHT`.
fn split_rule(arg: &str) -> std::result::Result<(&str, &str, &str), String> {
    let (name, body) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=...:..., got '{}'", arg))?;
    let (left, right) = body
        .split_once(':')
        .ok_or_else(|| format!("expected ':' between the two hex values in '{}'", arg))?;
    if name.trim().is_empty() {
        return Err(format!("rule name is empty in '{}'", arg));
    }
    Ok((name.trim(), left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ygofm::patch::RuleTarget;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/games/fm.bin"), "Patched"),
            PathBuf::from("/games/fm_Patched.bin")
        );
        assert_eq!(
            output_path(Path::new("disc"), "Reversed"),
            PathBuf::from("disc_Reversed")
        );
    }

    #[test]
    fn test_parse_rules() {
        let rule = parse_signature_rule("Fast Win=AABBCC:112233").unwrap();
        assert_eq!(rule.name(), "Fast Win");
        assert_eq!(rule.written(), &[0x11, 0x22, 0x33]);

        let rule = parse_address_rule("Chips=0x1B0660:FFFF").unwrap();
        assert_eq!(rule.target(), &RuleTarget::Address { address: 0x1B0660 });

        assert!(parse_signature_rule("AABBCC:112233").is_err());
        assert!(parse_signature_rule("x=AABBCC").is_err());
        assert!(parse_address_rule("x=zz:11").is_err());
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        fs::write(&path, b"old contents").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_patch_and_reverse_files() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("fm.bin");
        let mut pristine = vec![0u8; 16];
        pristine[..6].copy_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        fs::write(&image_path, &pristine).unwrap();

        let engine = PatchEngine::new(vec![parse_signature_rule("demo=AABBCC:112233").unwrap()]);
        cmd_patch(
            &engine,
            &image_path,
            Some(ReverseSelection::Names(vec!["demo".to_string()])),
        )
        .unwrap();

        let patched = fs::read(dir.path().join("fm_Patched.bin")).unwrap();
        assert_eq!(&patched[..4], &[0x11, 0x22, 0x33, 0xDD]);
        assert_eq!(fs::read(dir.path().join("fm_Reversed.bin")).unwrap(), pristine);
        assert_eq!(fs::read(&image_path).unwrap(), pristine);
    }

    #[test]
    fn test_reverse_unknown_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("fm.bin");
        fs::write(&image_path, [0xAA, 0xBB, 0xCC]).unwrap();

        let engine = PatchEngine::new(vec![parse_signature_rule("demo=AABBCC:112233").unwrap()]);
        let result = cmd_patch(
            &engine,
            &image_path,
            Some(ReverseSelection::Names(vec!["other".to_string()])),
        );

        assert!(result.is_err());
        assert!(!dir.path().join("fm_Reversed.bin").exists());
    }
}
