//! squeeze-cli - Command-line interface for squeeze
//!
//! Compresses and decompresses files or directories using the best
//! compression method available on the host, or a method picked by
//! extension.

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use squeeze::{naming, Codec, DEFAULT_COMPRESSION_LEVEL};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "squeeze-cli")]
#[command(about = "Compress files and directories with the best method available")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file or directory
    Compress {
        /// File or directory to compress
        input: PathBuf,

        /// Output artifact (defaults to the input plus the method's extension)
        output: Option<PathBuf>,

        /// Compression level (1 = fastest, 9 = smallest)
        #[arg(short, long, default_value_t = DEFAULT_COMPRESSION_LEVEL,
              value_parser = clap::value_parser!(u32).range(1..=9))]
        level: u32,

        /// Pick the method for this extension instead of the best overall
        #[arg(short, long)]
        extension: Option<String>,

        /// Force overwrite of the output
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a previously compressed artifact
    Decompress {
        /// Compressed artifact
        input: PathBuf,

        /// Output file or directory (defaults to the input minus its extension)
        output: Option<PathBuf>,

        /// Force overwrite of existing output
        #[arg(short, long)]
        force: bool,
    },

    /// List registered compression methods and their availability
    List,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            level,
            extension,
            force,
        } => compress(
            &input,
            output.as_deref(),
            level,
            extension.as_deref(),
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress(&input, output.as_deref(), force, cli.verbose, cli.quiet),
        Commands::List => list(cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Pick a method: by extension when requested, best overall otherwise.
fn pick_method(extension: Option<&str>) -> Result<&'static dyn Codec, Box<dyn std::error::Error>> {
    match extension {
        Some(ext) => squeeze::for_extension(ext)
            .ok_or_else(|| format!("no available compression method for extension '{}'", ext).into()),
        None => squeeze::best()
            .ok_or_else(|| "no compression method is available on this host".into()),
    }
}

fn compress(
    input: &Path,
    output: Option<&Path>,
    level: u32,
    extension: Option<&str>,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input '{}' does not exist", input.display()).into());
    }

    let method = pick_method(extension)?;
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => method.output_path(input),
    };

    if verbose {
        println!(
            "Compressing '{}' to '{}' using {} (level {})",
            input.display(),
            output.display(),
            method.name(),
            level
        );
    }

    let start_time = Instant::now();
    let progress = spinner(input, quiet, "Compressing...");

    method.compress(input, &output, level, force)?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let elapsed = start_time.elapsed();
    let input_size = tree_size(input);
    let output_size = file_size(&output);

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Method: {}", method.name());
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        if input_size > 0 {
            println!(
                "  Ratio:  {:.1}%",
                (output_size as f64 / input_size as f64) * 100.0
            );
        }
        println!("  Time:   {:.2?}", elapsed);
    }

    Ok(())
}

fn decompress(
    input: &Path,
    output: Option<&Path>,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input '{}' does not exist", input.display()).into());
    }

    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    let method = pick_method(Some(&extension))?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => naming::decompressed_path(input),
    };

    if verbose {
        println!(
            "Decompressing '{}' to '{}' using {}",
            input.display(),
            output.display(),
            method.name()
        );
    }

    let start_time = Instant::now();
    let progress = spinner(input, quiet, "Decompressing...");

    method.decompress(input, &output, force)?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Method: {}", method.name());
        println!("  Output: {}", output.display());
        println!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn list(quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    if quiet {
        return Ok(());
    }

    println!("Registered compression methods (highest priority first):");
    for entry in squeeze::global().registrations() {
        println!(
            "  priority {:>2}  {:<6} .{:<4} {}",
            entry.priority,
            entry.codec.name(),
            entry.extension,
            if entry.codec.is_available() {
                "available"
            } else {
                "not available"
            }
        );
    }

    match squeeze::best() {
        Some(method) => println!("\nBest method right now: {}", method.name()),
        None => println!("\nNo compression method is available on this host"),
    }

    Ok(())
}

/// Show a spinner for directories and large files.
fn spinner(input: &Path, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    let large = input.is_dir() || file_size(input) > 1024 * 1024;
    if quiet || !large {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

fn file_size(path: &Path) -> u64 {
    path.metadata().map(|meta| meta.len()).unwrap_or(0)
}

/// Total size of a file or of all files below a directory.
fn tree_size(path: &Path) -> u64 {
    if path.is_dir() {
        walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|meta| meta.len())
            .sum()
    } else {
        file_size(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let input_path = dir.path().join("input.txt");
        let compressed_path = dir.path().join("input.txt.zip");
        let output_path = dir.path().join("restored.txt");

        let test_data = b"Hello, World! This is a test of the squeeze CLI tool.";
        fs::write(&input_path, test_data)?;

        compress(
            &input_path,
            Some(compressed_path.as_path()),
            5,
            Some("zip"),
            false,
            false,
            true,
        )?;

        decompress(
            &compressed_path,
            Some(output_path.as_path()),
            false,
            false,
            true,
        )?;

        let result_data = fs::read(&output_path)?;
        assert_eq!(test_data, &result_data[..]);

        Ok(())
    }

    #[test]
    fn test_list_runs() -> Result<(), Box<dyn std::error::Error>> {
        list(true)?;
        list(false)?;
        Ok(())
    }
}
