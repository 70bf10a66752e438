//! # recurscope - Main Entry Point
//!
//! - `trace` streams events from a tracer thread over a channel and prints
//!   them as they arrive
//! - `tree`, `stack`, `complexity` print one finished view
//! - `play` / `replay` open the terminal UI

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use recurscope::analysis::{reference_curve, sample_complexity, GrowthModel, TraceStats};
use recurscope::catalog::{parse_arguments, Catalog, CatalogEntry};
use recurscope::cli::{Args, Command, Target};
use recurscope::domain::{ArgumentError, TraceError, TraceEvent, Value};
use recurscope::export::ChromeTraceExporter;
use recurscope::interceptor::{ChannelSink, Tracer, TracerConfig};
use recurscope::playback::{describe_step, PlaybackCursor};
use recurscope::report;
use recurscope::session::Session;
use recurscope::trace_data::{LiveTrace, Trace};
use recurscope::tui::App;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Deep call trees are rebuilt and drawn recursively
const MAIN_STACK_SIZE: usize = 64 * 1024 * 1024;

fn main() {
    env_logger::init();
    std::process::exit(match run_on_large_stack() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ArgumentError>().is_some()
        || matches!(err.downcast_ref::<TraceError>(), Some(TraceError::NotAFunction(_)))
    {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn run_on_large_stack() -> Result<()> {
    std::thread::Builder::new()
        .name("recurscope".into())
        .stack_size(MAIN_STACK_SIZE)
        .spawn(run)
        .context("Failed to spawn main thread")?
        .join()
        .map_err(|_| anyhow::anyhow!("main thread panicked"))?
}

fn run() -> Result<()> {
    let args = Args::parse();
    let catalog = Catalog::builtin();
    let config = args.tracer_config();
    let quiet = args.quiet;

    match args.command {
        Command::List => {
            list(&catalog);
            Ok(())
        }
        Command::Trace { target, export, chrome } => {
            let (entry, values) = resolve(&catalog, &target)?;
            stream_trace(entry, values, config, export.as_deref(), chrome.as_deref(), quiet)
        }
        Command::Tree { target, step } => {
            let (entry, values) = resolve(&catalog, &target)?;
            let (trace, failure) = trace_or_partial(entry, values, config)?;
            let cursor = cursor_at(&trace, step);
            print!("{}", report::render_tree(cursor.tree(&trace).as_ref()));
            finish(failure)
        }
        Command::Stack { target, step } => {
            let (entry, values) = resolve(&catalog, &target)?;
            let (trace, failure) = trace_or_partial(entry, values, config)?;
            let cursor = cursor_at(&trace, step);
            if !quiet {
                if let Some(line) = cursor.position().and_then(|p| describe_step(&trace, p)) {
                    println!("{line}");
                }
            }
            print!("{}", report::render_stack(&cursor.stack(&trace)));
            finish(failure)
        }
        Command::Complexity { target, size_arg, upper, big_o } => {
            let (entry, values) = resolve(&catalog, &target)?;
            let upper = upper.or_else(|| values.get(size_arg).and_then(Value::floor_int)).unwrap_or(0);
            let samples =
                sample_complexity(&Tracer::new(config), entry.function.as_ref(), &values, size_arg, upper)?;
            let model = GrowthModel::from_label(big_o.as_deref().unwrap_or(entry.big_o));
            if !quiet {
                println!("{}: reference {model}", entry.name());
            }
            print!("{}", report::render_samples(&samples, &reference_curve(&samples, model)));
            Ok(())
        }
        Command::Play { target } => {
            let (entry, values) = resolve(&catalog, &target)?;
            let session = match Session::run(entry, values, config) {
                Ok(session) => session,
                Err(e) => Session::failed(&e).ok_or(e)?,
            };
            App::new(session).run()
        }
        Command::Replay { file } => {
            let trace = Trace::from_file(&file)?;
            info!("loaded {} events from {}", trace.len(), file.display());
            let big_o = trace
                .events()
                .first()
                .and_then(TraceEvent::as_call)
                .and_then(|call| catalog.get(&call.function_name).ok())
                .map(|entry| entry.big_o);
            App::new(Session::from_trace(trace, big_o)).run()
        }
    }
}

fn list(catalog: &Catalog) {
    for entry in catalog.entries() {
        println!("{:<16} {:<9} ({})", entry.name(), entry.big_o, entry.default_args);
        println!("{:<16} {}", "", entry.description);
    }
}

fn resolve<'c>(catalog: &'c Catalog, target: &Target) -> Result<(&'c CatalogEntry, Vec<Value>)> {
    let entry = catalog.get(&target.function)?;
    let values = parse_arguments(target.args.as_deref().unwrap_or(entry.default_args))?;
    Ok((entry, values))
}

/// Full trace, or the partial trace and error message of a failed run
fn trace_or_partial(
    entry: &CatalogEntry,
    values: Vec<Value>,
    config: TracerConfig,
) -> Result<(Trace, Option<TraceError>)> {
    match Tracer::new(config).trace(entry.function.as_ref(), values) {
        Ok(trace) => Ok((trace, None)),
        Err(e) => match e.partial_trace() {
            Some(partial) => Ok((partial.clone(), Some(e))),
            None => Err(e.into()),
        },
    }
}

fn cursor_at(trace: &Trace, step: Option<usize>) -> PlaybackCursor {
    let mut cursor = PlaybackCursor::at_end(trace);
    if let Some(step) = step {
        cursor.seek(step);
    }
    cursor
}

fn finish(failure: Option<TraceError>) -> Result<()> {
    failure.map_or(Ok(()), |e| Err(e.into()))
}

/// Trace on a worker thread and print events as they arrive
fn stream_trace(
    entry: &CatalogEntry,
    values: Vec<Value>,
    config: TracerConfig,
    export: Option<&Path>,
    chrome: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let (mut sink, rx) = ChannelSink::bounded();
    let function = Arc::clone(&entry.function);
    let handle = std::thread::Builder::new()
        .name("stream".into())
        .spawn(move || Tracer::new(config).trace_into(function.as_ref(), values, &mut sink))
        .context("Failed to spawn stream thread")?;

    let mut live = LiveTrace::new();
    for event in rx {
        let depth = match &event {
            TraceEvent::Call(_) => live.depth(),
            TraceEvent::Return(_) => live.depth().saturating_sub(1),
        };
        println!("{}", report::event_line(&event, depth));
        live.add_event(event);
    }

    let outcome = handle.join().map_err(|_| anyhow::anyhow!("tracer thread panicked"))?;
    let trace = live.into_trace();

    if !quiet {
        match &outcome {
            Ok(value) => println!("result: {value}"),
            Err(_) => println!("(run failed after {} events)", trace.len()),
        }
        print!("{}", report::render_stats(&TraceStats::from_trace(&trace)));
    }

    if let Some(path) = export {
        let file = File::create(path).context("Failed to create trace output file")?;
        trace.to_writer(BufWriter::new(file)).context("Failed to export trace")?;
        info!("exported {} events to {}", trace.len(), path.display());
        if !quiet {
            println!("saved: {}", path.display());
        }
    }
    if let Some(path) = chrome {
        let file = File::create(path).context("Failed to create Chrome trace file")?;
        ChromeTraceExporter::from_trace(&trace)
            .export(BufWriter::new(file))
            .context("Failed to export Chrome trace")?;
        info!("exported Chrome trace to {}", path.display());
        if !quiet {
            println!("saved: {}", path.display());
        }
    }

    outcome.map(|_| ()).map_err(|source| {
        TraceError::Execution { function: entry.name().to_string(), source, partial: trace }.into()
    })
}
