//! Filesystem locations: home directory expansion and XDG roots.

pub mod xdg_root;
