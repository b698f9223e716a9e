//! Behavioural test suites for the safe editor.

mod behaviour;
