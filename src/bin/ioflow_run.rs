use std::env;
use std::io::Write;

use ioflow::{Endpoint, EndpointKind, Payload, Workflow, WorkflowConfig};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let config_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: ioflow-run <workflow-config.yaml> [source] [sink]");
            std::process::exit(1);
        }
    };
    let source = args.next();
    let sink = args.next();

    let config = WorkflowConfig::from_path(&config_path)?;
    let mut workflow = Workflow::new(config);
    let run = workflow.run(source.as_deref(), sink.as_deref())?;

    // String sinks are printed.
    let writer_kind = EndpointKind::parse(run.writer.handle().kind());
    if matches!(writer_kind, Ok(EndpointKind::String)) {
        let mut stdout = std::io::stdout().lock();
        match run.output() {
            Some(Payload::Text(text)) => writeln!(stdout, "{text}")?,
            Some(Payload::Bytes(bytes)) => stdout.write_all(bytes)?,
            Some(Payload::Data(value)) => writeln!(stdout, "{}", serde_json::to_string(value)?)?,
            None => {}
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("ioflow-run error: {e}");
        std::process::exit(1);
    }
}
