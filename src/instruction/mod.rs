pub mod launchpad;
