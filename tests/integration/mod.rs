//! Integration tests for the tabsync registries

mod end_to_end;
mod tab_races;
mod test_utils;
