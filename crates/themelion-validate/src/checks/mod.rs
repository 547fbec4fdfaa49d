mod references;
mod registry;

pub(crate) use references::{roadmaps, topics};
pub(crate) use registry::{duplicates, examples, summaries};
