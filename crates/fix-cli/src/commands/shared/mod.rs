pub mod limit;
pub mod parse;

use fix_directory::DirectoryError;

/// Surface a service failure as the message shown to the user.
pub fn user_error(error: DirectoryError) -> anyhow::Error {
    anyhow::anyhow!(error.user_message())
}
