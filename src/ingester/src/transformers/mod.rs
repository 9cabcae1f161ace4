pub mod guest_stats;
