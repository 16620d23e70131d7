pub(crate) mod capability;
pub(crate) mod pipeline;
pub(crate) mod png;
pub(crate) mod sink;
pub(crate) mod watermark;
