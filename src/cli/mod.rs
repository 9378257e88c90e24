mod args;

pub use args::{
    CliArgs, Command, CompressionLevel, InitArgs, NormalizeArgs, ProcessArgs, ResizeFilter,
    TuningArgs,
};
