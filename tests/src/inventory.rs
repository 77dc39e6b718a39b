mod pipeline;
mod subnet;
