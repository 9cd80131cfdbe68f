// End-to-end integration tests for the Promo Studio API
//
// One PostgreSQL container is shared by the whole suite. Each test leases
// its own migrated database (test_db_<uuid>) from a pool through the
// test-context lifecycle hooks, so tests run in parallel without seeing
// each other's rows. The text-generation provider is replaced by a
// scripted double that never leaves the process.

mod test_audio_files;
mod test_content_api;
