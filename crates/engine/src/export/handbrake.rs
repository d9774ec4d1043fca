use vbatch_runtime::HANDBRAKE_SCRIPT_EXTENSION;

use super::{ExportJob, ScriptBackend, xml::XmlWriter};
use crate::{
    cmdline::{arg_value, remove_arg_and_value},
    error::{EngineError, Result},
};

const FORMAT_ARG: &str = "-f ";
const JOB_TITLE: &str = "1";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Writes a HandBrake queue file (`ArrayOfJob` XML) with one custom query
/// per file.
#[derive(Debug, Clone, Default)]
pub struct HandbrakeBackend {
    template: String,
}

impl HandbrakeBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptBackend for HandbrakeBackend {
    fn name(&self) -> &'static str {
        "handbrake"
    }

    fn script_extension(&self) -> &'static str {
        HANDBRAKE_SCRIPT_EXTENSION
    }

    /// The container format given with `-f`.
    fn extract_extension(&self, template: &str) -> Result<String> {
        if template.trim().is_empty() {
            return Err(EngineError::EmptyTemplate);
        }
        arg_value(template, FORMAT_ARG).ok_or_else(|| EngineError::MissingArgument {
            arg: FORMAT_ARG.trim_end().to_owned(),
            template: template.to_owned(),
        })
    }

    fn prepare(&mut self, template: &str) -> Result<()> {
        self.template = template.to_owned();
        Ok(())
    }

    fn compose_line(&self, source: &str, destination: &str) -> String {
        format!("-i \"{source}\" -o \"{destination}\" {}", self.template)
    }

    fn serialize(&self, jobs: &[ExportJob]) -> String {
        let mut w = XmlWriter::new();
        let attrs = [("xmlns:xsi", XSI_NAMESPACE), ("xmlns:xsd", XSD_NAMESPACE)];

        if jobs.is_empty() {
            w.empty_element("ArrayOfJob", &attrs);
            return w.finish();
        }

        w.open("ArrayOfJob", &attrs);
        for job in jobs {
            w.open("Job", &[]);
            w.leaf("Id", &job.id.to_string());
            w.leaf("Title", JOB_TITLE);
            w.leaf("Query", &job.command_line);
            w.leaf("CustomQuery", "true");
            w.leaf("Source", &job.source);
            w.leaf("Destination", &job.destination);
            w.close("Job");
        }
        w.close("ArrayOfJob");
        w.finish()
    }
}

/// Strip input and output arguments from a pasted HandBrake command line so
/// it can serve as a per-file template.
///
/// Removal is positional: spacing inside the template is kept as typed, only
/// the ends are trimmed.
pub fn sanitize_template(command_line: &str) -> String {
    remove_arg_and_value(command_line, &["-i", "-o"])
        .trim()
        .to_owned()
}
