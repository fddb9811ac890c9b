use std::process::ExitCode;

use clap::Parser;

use trimwave::buffer::merge_blocks;
use trimwave::cli::Cli;
use trimwave::error::SilencerError;
use trimwave::output::{Output, fmt_time};
use trimwave::report::{build_report, write_report};
use trimwave::silencer::{RemovalOutcome, Silencer};
use trimwave::{apply_crossfade, decode_wav, encode_wav, excise_segments, merge_channel_segments};

const ERR_IO: u8 = 1;
const ERR_ALL_SILENT: u8 = 2;
const ERR_RENDER: u8 = 3;

fn main() -> ExitCode {
    let args = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.debug { "debug" } else { "warn" }),
    )
    .init();

    let silencer = match Silencer::new(args.params()) {
        Ok(silencer) => silencer,
        Err(err) => {
            eprintln!("silence removal failed: {err}");
            return ExitCode::from(ERR_IO);
        }
    };

    let mut blocks = Vec::with_capacity(args.input.len());
    for path in &args.input {
        let Ok(bytes) = std::fs::read(path) else {
            println!("Could not open file: {path}");
            return ExitCode::from(ERR_IO);
        };
        match decode_wav(&bytes) {
            Ok(block) => blocks.push(block),
            Err(err) => {
                eprintln!("silence removal failed: {path}: {err}");
                return ExitCode::from(ERR_IO);
            }
        }
    }
    let buffer = match merge_blocks(&blocks) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("silence removal failed: {err}");
            return ExitCode::from(ERR_IO);
        }
    };

    let params = silencer.params();
    println!("[+] sample rate:       {}", buffer.sample_rate());
    println!("[+] channels:          {}", buffer.channel_count());
    println!("[+] total samples:     {}", buffer.len());
    println!("[+] duration:          {}", fmt_time(buffer.duration()));
    println!("[+] energy threshold:  {}", params.threshold);
    println!("[+] minimum silence:   {}s", params.minimum_silence_duration);
    println!("[+] frame time:        {}s", params.frame_time);
    println!("[+] crossfade:         {}s", params.crossfade_duration);

    let output = Output::new(&args, 4);

    output.stage("detecting");
    let channel_segments = silencer.detect_channels(&buffer);
    let canonical_segments = merge_channel_segments(&channel_segments);

    output.stage("excising");
    let excised = match excise_segments(&buffer, &canonical_segments) {
        Ok(excised) => excised,
        Err(err @ SilencerError::InvalidBufferLength(_)) => {
            output.finish();
            eprintln!("silence removal failed: {err}: nothing left to export");
            return ExitCode::from(ERR_ALL_SILENT);
        }
        Err(err) => {
            output.finish();
            eprintln!("silence removal failed: {err}");
            return ExitCode::from(ERR_IO);
        }
    };

    output.stage("crossfading");
    let faded = match apply_crossfade(&excised, &canonical_segments, params.crossfade_duration) {
        Ok(faded) => faded,
        Err(err) => {
            output.finish();
            eprintln!("silence removal failed: {err}");
            return ExitCode::from(ERR_RENDER);
        }
    };

    output.stage("encoding");
    let wav = encode_wav(&faded.to_mono());
    output.finish();

    let digits = canonical_segments.len().to_string().len().max(2);
    for (index, segment) in canonical_segments.iter().enumerate() {
        println!(
            "[{:0digits$}] SILENCE: {} -> {} ({:.3}s)",
            index,
            fmt_time(segment.start),
            fmt_time(segment.end),
            segment.duration(),
            digits = digits,
        );
    }
    let removed: f64 = canonical_segments
        .iter()
        .map(|segment| segment.duration())
        .sum();

    if let Err(err) = std::fs::write(&args.output, &wav) {
        eprintln!("silence removal failed: could not write {}: {err}", args.output);
        return ExitCode::from(ERR_IO);
    }
    println!(
        "[+] removed {:.3}s of silence, wrote {} ({} bytes)",
        removed,
        args.output,
        wav.len()
    );

    if let Some(path) = &args.json {
        let outcome = RemovalOutcome {
            buffer: faded,
            channel_segments,
            canonical_segments,
        };
        let report = build_report(&outcome, params, buffer.sample_rate(), buffer.duration());
        if let Err(err) = write_report(path, &report) {
            eprintln!("could not write JSON report to {path}: {err}");
            return ExitCode::from(ERR_IO);
        }
        println!("[+] wrote JSON report to {path}");
    }

    ExitCode::SUCCESS
}
