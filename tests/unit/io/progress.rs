//! Tests for progress tracking and progress-aware logging

#[cfg(test)]
mod tests {
    use indicatif::{MultiProgress, ProgressDrawTarget};
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use polypack::io::progress::{ProgressLogger, ProgressManager};
    use std::path::Path;

    fn hidden_logger(level: LevelFilter) -> ProgressLogger {
        ProgressLogger::new(
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            level,
        )
    }

    // Tests records are prefixed with a lowercase level label
    // Verified by printing the level's uppercase name
    #[test]
    fn test_format_record_labels() {
        assert_eq!(
            ProgressLogger::format_record(
                &Record::builder()
                    .args(format_args!("region 3 undecided"))
                    .level(Level::Warn)
                    .build()
            ),
            "warning: region 3 undecided"
        );
        assert_eq!(
            ProgressLogger::format_record(
                &Record::builder()
                    .args(format_args!("done"))
                    .level(Level::Debug)
                    .build()
            ),
            "debug: done"
        );
    }

    // Tests the logger filters records above its level
    // Verified by enabling every level
    #[test]
    fn test_logger_level_filter() {
        let logger = hidden_logger(LevelFilter::Warn);

        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));

        let silent = hidden_logger(LevelFilter::Off);
        assert!(!silent.enabled(&Metadata::builder().level(Level::Error).build()));
    }

    // Tests logging through a hidden target does not panic
    // Verified by unwrapping the println result of a hidden target
    #[test]
    fn test_logger_hidden_target() {
        let logger = hidden_logger(LevelFilter::Debug);

        logger.log(
            &Record::builder()
                .args(format_args!("hidden"))
                .level(Level::Debug)
                .build(),
        );
        logger.flush();
    }

    // Tests a small batch runs through the full progress lifecycle
    // Verified by indexing file states without resizing
    #[test]
    fn test_progress_lifecycle_small_batch() {
        let mut manager = ProgressManager::new();
        manager.initialize(2);

        assert_eq!(manager.file_count(), 2);

        manager.start_file(1, Path::new("b.txt"), 4);
        manager.update_regions(1, 2);
        manager.start_file(0, Path::new("a.txt"), 3);
        manager.update_regions(0, 3);
        manager.complete_file(0, 2);
        manager.complete_file(1, 4);
        manager.finish();
    }

    // Tests a large batch adds the batch bar and keeps a rolling window
    // Verified by creating one bar per file
    #[test]
    fn test_progress_lifecycle_large_batch() {
        let mut manager = ProgressManager::default();
        manager.initialize(12);

        for index in 0..12 {
            let name = format!("puzzle{index}.txt");
            manager.start_file(index, Path::new(&name), 10);
            manager.update_regions(index, 5);
            manager.complete_file(index, index);
        }
        // Updates for files never started are ignored
        manager.update_regions(40, 1);
        manager.finish();

        assert_eq!(manager.file_count(), 12);
    }
}
