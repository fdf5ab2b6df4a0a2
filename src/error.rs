// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Error` struct and the `ErrorKind` enum, which are
//! used to represent errors that can occur in the library.

use crate::SizingStage;

/// A macro for defining the `ErrorKind` enum, the `Display` implementation for
/// it, and the constructors for the `Error` struct.
macro_rules! ErrorKind {
    ($(
        ($kind:ident, $ctor:ident)
    ),*) => {
        /// The kind of error that occurred.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum ErrorKind {
            $(
                $kind,
            )*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$kind => write!(f, "{}", stringify!($kind)),
                    )*
                }
            }
        }

        /// Constructors for [`Error`].
        impl Error {
            $(
                #[doc = concat!(
                    "Creates a new [`Error`] with the `",
                    stringify!($kind),
                    "` kind and the given description."
                )]
                pub(crate) fn $ctor(desc: impl Into<String>) -> crate::Error {
                    Self {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                        stage: None,
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (CapacityExceeded, capacity_exceeded),
    (Configuration, configuration),
    (Data, data),
    (Internal, internal),
    (InvalidConnection, invalid_connection),
    (InvalidGraph, invalid_graph),
    (NodeNotFound, node_not_found),
    (PipeNotFound, pipe_not_found),
    (Topology, topology)
);

/// An error that can occur during the creation of a
/// [HydronicGraph][crate::HydronicGraph] or during a sizing run.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
    stage: Option<SizingStage>,
}

impl Error {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the description of the error.
    pub fn description(&self) -> &str {
        &self.desc
    }

    /// Returns the sizing stage that failed, if the error was raised while
    /// running [`size_hydronic_network`][crate::HydronicGraph::size_hydronic_network].
    pub fn stage(&self) -> Option<SizingStage> {
        self.stage
    }

    /// Attaches the given stage, unless the error already carries one.
    pub(crate) fn with_stage(mut self, stage: SizingStage) -> Self {
        self.stage.get_or_insert(stage);
        self
    }

    /// Prefixes the description, keeping the kind.
    pub(crate) fn context(mut self, prefix: impl std::fmt::Display) -> Self {
        self.desc = format!("{prefix}: {}", self.desc);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "[{}] {}: {}", stage, self.kind, self.desc),
            None => write!(f, "{}: {}", self.kind, self.desc),
        }
    }
}

impl std::error::Error for Error {}
