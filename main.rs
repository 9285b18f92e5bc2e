use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

mod arena;
mod buffer;
mod error;
mod rank;
mod table;
mod tokenize;

use crate::arena::{RecordArena, RecordId};
use crate::buffer::ByteBuffer;
use crate::error::Error;
use crate::table::WordTable;
use crate::tokenize::Tokenizer;

const INPUT_PATH: &str = "./shakespeare.txt"; // corpus read whole on every run
const BUCKET_COUNT: usize = 1 << 13; // fixed at startup, never rehashed

/// Counters from one scan, reported on stderr after the run.
#[derive(Debug)]
struct ScanStats {
    bytes: usize,
    word_runs: usize,
    distinct: usize,
    blocks: usize,
}

/// Tokenize `buf` in place and fold every word run into the table.
fn scan(
    buf: &mut [u8],
    table: &mut WordTable,
    arena: &mut RecordArena,
) -> Result<ScanStats, Error> {
    let mut tokenizer = Tokenizer::new(buf);
    let mut word_runs = 0usize;
    while let Some((span, hash)) = tokenizer.next_word() {
        table.lookup_or_insert(tokenizer.bytes(), span, hash, arena)?;
        word_runs += 1;
    }
    debug_assert_eq!(table.distinct(), arena.len());

    Ok(ScanStats {
        bytes: tokenizer.bytes().len(),
        word_runs,
        distinct: table.distinct(),
        blocks: arena.block_count(),
    })
}

/// Render the ranked listing: a leading blank line, then one line per word.
fn print_ranked(
    out: &mut impl Write,
    text: &[u8],
    arena: &RecordArena,
    ranked: &[RecordId],
) -> io::Result<()> {
    writeln!(out)?;
    for (position, &id) in ranked.iter().enumerate() {
        let record = arena.get(id);
        let word = String::from_utf8_lossy(record.span.bytes(text));
        writeln!(out, "{}. {}, frequency: {}", position + 1, word, record.frequency)?;
    }
    Ok(())
}

/// Parse the single positional argument: how many top words to print.
fn parse_count(mut args: impl Iterator<Item = String>) -> Result<usize, Error> {
    let program = args.next().unwrap_or_else(|| "word-rank".to_string());
    let raw = match args.next() {
        Some(raw) => raw,
        None => return Err(Error::Usage(format!("usage: {program} <count>"))),
    };
    if args.next().is_some() {
        return Err(Error::Usage(format!("usage: {program} <count>")));
    }
    raw.parse().map_err(|_| {
        Error::Usage(format!("count must be a non-negative integer, got {raw:?}"))
    })
}

fn run() -> Result<(), Error> {
    let count = parse_count(std::env::args())?;

    let total_start = Instant::now();
    let mut corpus = ByteBuffer::load(Path::new(INPUT_PATH))?;

    let mut table = WordTable::new(BUCKET_COUNT)?;
    let mut arena = RecordArena::new();
    let scan_start = Instant::now();
    let stats = scan(corpus.as_mut_slice(), &mut table, &mut arena)?;
    let scan_time = scan_start.elapsed();

    let rank_start = Instant::now();
    let ranked = rank::top_n(&arena, count);
    let rank_time = rank_start.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_ranked(&mut out, corpus.as_slice(), &arena, &ranked)?;
    out.flush()?;

    let total_time = total_start.elapsed();
    eprintln!(
        "{} bytes scanned, {} word runs, {} distinct words, {} record blocks",
        stats.bytes, stats.word_runs, stats.distinct, stats.blocks
    );
    eprintln!(
        "scan {:.2?} ({:.1}% of total), rank {:.2?}, total {:.2?}",
        scan_time,
        scan_time.as_secs_f64() / total_time.as_secs_f64() * 100.0,
        rank_time,
        total_time
    );

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR: {err}");
        process::exit(err.exit_code());
    }
}
