pub mod collection;
pub mod cursor;
pub mod linker;
pub mod note;

pub use self::collection::{LinkedCollection, NoteGroup, NoteId};
pub use self::cursor::NotesCursor;
pub use self::linker::build;
pub use self::note::{LinkedNote, NoteError};
