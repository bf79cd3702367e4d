//! The workflow coordinator: build endpoints and a transfer step from a
//! configuration and run them from a source to a sink.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::{EndpointConfig, EndpointSpec, ProcessorSpec, WorkflowConfig};
use crate::endpoint::{InputEndpoint, OutputEndpoint, Reader, Writer};
use crate::error::IoflowError;
use crate::io::{FilesystemRegistry, default_filesystems};
use crate::logging::LoggerConfig;
use crate::payload::Payload;
use crate::transfer::{TransferStep, default_processor};

pub type ReaderFactory =
    Box<dyn Fn(EndpointSpec) -> Result<Box<dyn InputEndpoint>, IoflowError> + Send + Sync>;
pub type WriterFactory =
    Box<dyn Fn(EndpointSpec) -> Result<Box<dyn OutputEndpoint>, IoflowError> + Send + Sync>;
pub type ProcessorFactory =
    Box<dyn Fn(ProcessorSpec) -> Result<Box<dyn TransferStep>, IoflowError> + Send + Sync>;

/// Build the stock [`Reader`].
pub fn default_reader(spec: EndpointSpec) -> Result<Box<dyn InputEndpoint>, IoflowError> {
    Ok(Box::new(Reader::from_spec(spec)))
}

/// Build the stock [`Writer`].
pub fn default_writer(spec: EndpointSpec) -> Result<Box<dyn OutputEndpoint>, IoflowError> {
    Ok(Box::new(Writer::from_spec(spec)))
}

/// The instances built for one run, kept for inspection.
pub struct WorkflowRun {
    pub reader: Box<dyn InputEndpoint>,
    pub writer: Box<dyn OutputEndpoint>,
    pub processor: Box<dyn TransferStep>,
}

impl WorkflowRun {
    /// What the reader read.
    pub fn input(&self) -> Option<&Payload> {
        self.reader.input()
    }

    /// What the writer wrote.
    pub fn output(&self) -> Option<&Payload> {
        self.writer.output()
    }
}

/// Runs one input-to-output workflow per call to [`run`](Self::run).
///
/// Reader, writer and processor are produced by factories. The defaults
/// build [`Reader`], [`Writer`] and the step chosen by
/// [`default_processor`].
pub struct Workflow {
    config: WorkflowConfig,
    filesystems: Arc<FilesystemRegistry>,
    reader_factory: ReaderFactory,
    writer_factory: WriterFactory,
    processor_factory: ProcessorFactory,
    source: Option<String>,
    sink: Option<String>,
    failed_run: Option<WorkflowRun>,
}

impl Workflow {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            filesystems: Arc::new(default_filesystems()),
            reader_factory: Box::new(default_reader),
            writer_factory: Box::new(default_writer),
            processor_factory: Box::new(default_processor),
            source: None,
            sink: None,
            failed_run: None,
        }
    }

    pub fn with_reader<F>(mut self, factory: F) -> Self
    where
        F: Fn(EndpointSpec) -> Result<Box<dyn InputEndpoint>, IoflowError> + Send + Sync + 'static,
    {
        self.reader_factory = Box::new(factory);
        self
    }

    pub fn with_writer<F>(mut self, factory: F) -> Self
    where
        F: Fn(EndpointSpec) -> Result<Box<dyn OutputEndpoint>, IoflowError>
            + Send
            + Sync
            + 'static,
    {
        self.writer_factory = Box::new(factory);
        self
    }

    pub fn with_processor<F>(mut self, factory: F) -> Self
    where
        F: Fn(ProcessorSpec) -> Result<Box<dyn TransferStep>, IoflowError> + Send + Sync + 'static,
    {
        self.processor_factory = Box::new(factory);
        self
    }

    /// Use a shared filesystem registry for url endpoints.
    pub fn with_filesystems(mut self, filesystems: Arc<FilesystemRegistry>) -> Self {
        self.filesystems = filesystems;
        self
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Get a named configuration section, if present.
    pub fn config_section(&self, name: &str) -> Option<&Value> {
        self.config.section(name)
    }

    /// Source identifier of the latest run.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Sink identifier of the latest run.
    pub fn sink(&self) -> Option<&str> {
        self.sink.as_deref()
    }

    /// Instances of the latest run, if its transfer failed.
    pub fn failed_run(&self) -> Option<&WorkflowRun> {
        self.failed_run.as_ref()
    }

    /// Take the instances of the latest failed run.
    pub fn take_failed_run(&mut self) -> Option<WorkflowRun> {
        self.failed_run.take()
    }

    /// Apply the `logger` section process-wide; no-op without one.
    pub fn setup_logging(&self) -> Result<(), IoflowError> {
        if let Some(section) = self.config_section("logger") {
            LoggerConfig::from_section(section)?.apply()?;
        }
        Ok(())
    }

    fn endpoint_spec(
        &self,
        section: &str,
        identifier: Option<String>,
    ) -> Result<EndpointSpec, IoflowError> {
        let raw = self.config_section(section).cloned();
        let config = EndpointConfig::from_section(raw.as_ref())?;
        Ok(EndpointSpec::new(identifier, config)
            .with_section(raw)
            .with_filesystems(self.filesystems.clone()))
    }

    /// Run one transfer from `source` to `sink`.
    ///
    /// Fresh reader, writer and processor instances are built on every call.
    /// When the transfer fails they stay available from
    /// [`failed_run`](Self::failed_run) until the next call.
    pub fn run(
        &mut self,
        source: Option<&str>,
        sink: Option<&str>,
    ) -> Result<WorkflowRun, IoflowError> {
        self.failed_run = None;
        self.source = source.map(str::to_string);
        self.sink = sink.map(str::to_string);
        self.setup_logging()?;

        let reader_spec = self.endpoint_spec("reader", self.source.clone())?;
        let writer_spec = self.endpoint_spec("writer", self.sink.clone())?;
        let processor_spec = ProcessorSpec::new(self.config_section("processor").cloned());

        let mut reader = (self.reader_factory)(reader_spec)?;
        let mut writer = (self.writer_factory)(writer_spec)?;
        let mut processor = (self.processor_factory)(processor_spec)?;

        info!(source = ?self.source, sink = ?self.sink, "running workflow");
        let outcome = processor.process(reader.as_mut(), writer.as_mut());
        let run = WorkflowRun {
            reader,
            writer,
            processor,
        };
        if let Err(err) = outcome {
            warn!(error = %err, "workflow failed");
            self.failed_run = Some(run);
            return Err(err);
        }
        info!("workflow finished");
        Ok(run)
    }
}
