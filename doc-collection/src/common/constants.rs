// doc constants
pub const DOC_ID: &str = "_id";
pub const RESERVED_FIELD_PREFIX: char = '_';

// search constants
pub const DESCENDING_PREFIX: char = '-';

// store constants
pub const DEFAULT_STORE_NAME: &str = "dc";
pub const DEFAULT_COLLECTION_NAME: &str = "documents";

// id constants
pub const ID_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
pub const ID_LENGTH: usize = 22;
