pub mod config;
pub mod extractor;
pub mod formatter;
pub mod pipeline;
pub mod placer;
pub mod resolver;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config, ConfigError,
};
pub use extractor::{extract, extract_path, Edition, Resolution, ResolutionRank, VideoInfo};
pub use formatter::{format, NamingScheme, Part, RenderedPath};
pub use pipeline::{find_largest_video, ProcessError, SortOutcome, SortSettings, Sorter};
pub use placer::{FsPlacer, Placer, PlacerConfig, PlacerError};
pub use resolver::{resolve, Action, DirectoryLister, FsLister, ResolvePolicy};
