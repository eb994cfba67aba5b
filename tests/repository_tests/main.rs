//! Repository Tests
//!
//! Grouped as one test binary:
//! - crud_tests: guarded create/update/delete, touch and save
//! - query_tests: snapshot selections and id assignment
