mod errors;
mod model;
mod services;

pub use errors::SourceError;
pub use model::{
    FOLDER_COLUMNS, FolderRow, ITEM_COLUMNS, ItemRow, RawResponse, RawTable,
    parse_response,
};
pub use services::{DataSource, FileSource, LOAD_FAILED_MESSAGE, StaticSource};
