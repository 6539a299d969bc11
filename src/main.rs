use anyhow::Context;
use clap::{Parser, Subcommand};
use homesong_lyrics::config;
use homesong_lyrics::lyrics::{self, LyricsFormat, LyricsRecord, LyricsSession, Timeline};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "homesong-lyrics", version, about = "Timed lyrics (LRC / LRCP) tool")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the parsed timeline.
    Parse {
        file: PathBuf,
        #[arg(long, value_enum)]
        format: Option<LyricsFormat>,
        /// Dump as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show the active line and word at a playback position.
    At {
        file: PathBuf,
        /// Playback position in seconds.
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
        /// Offset in milliseconds added to the playback position.
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i64>,
        #[arg(long, value_enum)]
        format: Option<LyricsFormat>,
    },
    /// Re-serialize a lyrics file to stdout.
    Fmt {
        file: PathBuf,
        /// Write plain LRC, dropping word timing.
        #[arg(long)]
        standard: bool,
        #[arg(long, value_enum)]
        format: Option<LyricsFormat>,
    },
    /// Tell whether a file carries word-level (karaoke) timing.
    Detect { file: PathBuf },
    /// Simulate playback and print each line as it becomes active.
    Follow {
        file: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i64>,
        /// Start position in seconds.
        #[arg(long, default_value_t = 0.0)]
        start: f64,
        /// Playback speed multiplier.
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
    /// Query a stored lyrics record (JSON object or array).
    Record {
        file: PathBuf,
        /// Record id to select; defaults to the first by index.
        #[arg(long)]
        id: Option<u64>,
        /// Playback position in seconds; without it the records are listed.
        #[arg(long, allow_negative_numbers = true)]
        at: Option<f64>,
    },
    /// Config file management.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the config file path.
    Path,
    /// Print the effective config.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    match cli.command {
        Command::Parse { file, format, json } => {
            let timeline = read_timeline(&file, format.unwrap_or(cfg.lyrics.format))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
            } else {
                print_timeline(&timeline);
            }
        }
        Command::At {
            file,
            seconds,
            offset,
            format,
        } => {
            let content = read_content(&file)?;
            let mut options = cfg.session_options();
            if let Some(format) = format {
                options.format = format;
            }
            let mut session = LyricsSession::new(options);
            session.set_content(&content, offset.unwrap_or(cfg.lyrics.default_offset_ms));
            let frame = session.frame(seconds);
            print_frame(&session, &frame);
        }
        Command::Fmt {
            file,
            standard,
            format,
        } => {
            let timeline = read_timeline(&file, format.unwrap_or(cfg.lyrics.format))?;
            if standard {
                print!("{}", lyrics::serialize_standard_lrc(&timeline));
            } else {
                print!("{}", lyrics::serialize(&timeline));
            }
        }
        Command::Detect { file } => {
            let content = read_content(&file)?;
            match LyricsFormat::detect(&content) {
                LyricsFormat::Lrcp => println!("lrcp (karaoke)"),
                other => println!("{}", other.as_str()),
            }
        }
        Command::Follow {
            file,
            offset,
            start,
            speed,
        } => {
            let content = read_content(&file)?;
            let mut session = LyricsSession::new(cfg.session_options());
            session.set_content(&content, offset.unwrap_or(cfg.lyrics.default_offset_ms));
            follow(&mut session, start, speed, cfg.player.tick_ms).await?;
        }
        Command::Record { file, id, at } => {
            let records = LyricsRecord::load_json(&file)?;
            let mut session = LyricsSession::new(cfg.session_options());
            session.load_records(records);
            if let Some(id) = id {
                session.select(id)?;
            }
            match at {
                Some(seconds) => {
                    let frame = session.frame(seconds);
                    print_frame(&session, &frame);
                }
                None => print_records(&session),
            }
        }
        Command::Config { cmd } => match cmd {
            ConfigCommand::Path => {
                let path = match cli.config {
                    Some(p) => p,
                    None => config::default_config_path().context("default config path")?,
                };
                println!("{}", path.display());
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn read_content(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

fn read_timeline(path: &Path, format: LyricsFormat) -> anyhow::Result<Timeline> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Timeline::from_utf8(&bytes, format).with_context(|| format!("parse {}", path.display()))
}

async fn follow(
    session: &mut LyricsSession,
    start: f64,
    speed: f64,
    tick_ms: u64,
) -> anyhow::Result<()> {
    let timeline = session.timeline();
    let Some(last) = timeline.lines().last() else {
        println!("(no timed lines)");
        return Ok(());
    };
    // Keep going until the last line has had its time on screen.
    let stop_at = last.end.unwrap_or(last.start).saturating_sub(session.offset()) as f64 / 1000.0 + 2.0;

    let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms.max(1)));
    let began = tokio::time::Instant::now();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            res = &mut ctrl_c => {
                res.context("wait for ctrl-c")?;
                break;
            }
        }

        let position = start + began.elapsed().as_secs_f64() * speed;
        let frame = session.frame(position);
        if frame.changed && frame.line_index.is_some() {
            println!("{} {}", lyrics::format_timecode(frame.time), frame.text);
        }
        if position > stop_at {
            break;
        }
    }

    Ok(())
}

fn print_timeline(timeline: &Timeline) {
    for (key, value) in timeline.tags() {
        println!("{key}: {value}");
    }
    for (i, line) in timeline.lines().iter().enumerate() {
        let end = line
            .end
            .map(lyrics::format_timecode)
            .unwrap_or_else(|| "[open]".to_string());
        println!(
            "{:03}. {} - {}  {}",
            i,
            lyrics::format_timecode(line.start),
            end,
            line.text()
        );
        if line.segments.len() > 1 {
            for segment in &line.segments {
                println!("       {} {:?}", lyrics::format_timecode(segment.start), segment.text);
            }
        }
    }
}

fn print_frame(session: &LyricsSession, frame: &lyrics::Frame) {
    let Some(index) = frame.line_index else {
        println!("(no active line at {} ms)", frame.time);
        return;
    };
    println!("line {index} @ {} ms: {}", frame.time, frame.text);

    if let Some(word) = frame.word_index
        && session.is_karaoke()
    {
        let timeline = session.timeline();
        let segment = &timeline.lines()[index].segments[word];
        println!("word {word}: {:?} ({:.0}%)", segment.text, frame.progress * 100.0);
    }
}

fn print_records(session: &LyricsSession) {
    let selected = session.selected().map(|r| r.id);
    for record in session.records() {
        let marker = if Some(record.id) == selected { "*" } else { " " };
        let kind = if record.is_karaoke() { "karaoke" } else { "lrc" };
        println!(
            "{marker} {:>4}  {}  ({kind}, offset {} ms)",
            record.id, record.name, record.offset
        );
    }
}
