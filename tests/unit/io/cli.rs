//! Tests for command-line parsing and complete generation runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{ImageBuffer, Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::executor::RunOutcome;
    use tilecollapse::io::cli::{Cli, Command, GenerationJob, HeuristicArg, SymmetryArg};
    use tilecollapse::io::configuration::{
        DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE,
        DEFAULT_SEED,
    };

    const RED: [u8; 4] = [220, 30, 30, 255];
    const BLUE: [u8; 4] = [30, 30, 220, 255];

    fn write_checker(path: &Path) {
        let img: RgbaImage = ImageBuffer::from_fn(4, 4, |x, y| {
            Rgba(if (x + y) % 2 == 0 { RED } else { BLUE })
        });
        img.save(path).unwrap();
    }

    fn job(args: &[&str]) -> GenerationJob {
        GenerationJob::new(Cli::parse_from(args))
    }

    fn arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    // Tests the overlapping subcommand with only its required argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_parse_overlapping_defaults() {
        let cli = Cli::parse_from(["tilecollapse", "overlapping", "sample.png"]);
        let Command::Overlapping(args) = &cli.command else {
            panic!("expected overlapping command");
        };

        assert_eq!(args.image, PathBuf::from("sample.png"));
        assert_eq!(args.pattern_size, DEFAULT_PATTERN_SIZE);
        assert_eq!(args.symmetry, SymmetryArg::All);
        assert!(!args.periodic_input);

        let common = cli.common();
        assert_eq!(common.width, DEFAULT_OUTPUT_WIDTH);
        assert_eq!(common.height, DEFAULT_OUTPUT_HEIGHT);
        assert_eq!(common.seed, DEFAULT_SEED);
        assert_eq!(common.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(common.heuristic, HeuristicArg::Entropy);
        assert!(!common.periodic);
        assert!(cli.should_show_progress());
        assert_eq!(cli.input_path(), Path::new("sample.png"));
    }

    // Tests the tiled subcommand with every option set
    // Verified by swapping the short flags of width and height
    #[test]
    fn test_parse_tiled_all_args() {
        let cli = Cli::parse_from([
            "tilecollapse",
            "tiled",
            "rules.xml",
            "-t",
            "tiles",
            "-r",
            "--infer",
            "--band-width",
            "2",
            "--tolerance",
            "12.5",
            "-w",
            "20",
            "-H",
            "10",
            "-p",
            "-s",
            "7",
            "--heuristic",
            "scanline",
            "-m",
            "0",
            "--visualize",
            "-o",
            "out/result.png",
            "-q",
            "-vv",
        ]);
        let Command::Tiled(args) = &cli.command else {
            panic!("expected tiled command");
        };

        assert_eq!(args.rules, PathBuf::from("rules.xml"));
        assert_eq!(args.tiles, Some(PathBuf::from("tiles")));
        assert!(args.reflections);
        assert!(args.infer);
        assert_eq!(args.band_width, 2);
        assert!((args.tolerance - 12.5).abs() < f64::EPSILON);

        let common = cli.common();
        assert_eq!((common.width, common.height), (20, 10));
        assert!(common.periodic);
        assert_eq!(common.seed, 7);
        assert_eq!(common.heuristic, HeuristicArg::Scanline);
        assert!(common.visualize);
        assert_eq!(common.output, Some(PathBuf::from("out/result.png")));
        assert_eq!(common.verbose, 2);
        assert!(!cli.should_show_progress());
    }

    // Tests symmetry names and a missing subcommand
    // Verified by renaming the symmetry values
    #[test]
    fn test_parse_symmetry_and_errors() {
        let cli = Cli::parse_from([
            "tilecollapse",
            "overlapping",
            "s.png",
            "--symmetry",
            "mirror-xy",
            "-n",
            "2",
        ]);
        let Command::Overlapping(args) = &cli.command else {
            panic!("expected overlapping command");
        };
        assert_eq!(args.symmetry, SymmetryArg::MirrorXy);
        assert_eq!(args.pattern_size, 2);

        assert!(Cli::try_parse_from(["tilecollapse", "sample.png"]).is_err());
        assert!(
            Cli::try_parse_from(["tilecollapse", "overlapping", "s.png", "--symmetry", "spin"])
                .is_err()
        );
    }

    // Tests a zero attempt ceiling means retrying without limit
    // Verified by passing the ceiling through unchanged
    #[test]
    fn test_generation_config_attempts() {
        let unlimited = Cli::parse_from(["tilecollapse", "tiled", "r.xml", "-m", "0", "-s", "5"]);
        let config = unlimited.common().generation_config();
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.seed, 5);

        let bounded = Cli::parse_from(["tilecollapse", "tiled", "r.xml", "-m", "3"]);
        assert_eq!(bounded.common().generation_config().max_attempts, Some(3));
    }

    // Tests default output paths sit next to the input
    // Verified by dropping the parent directory
    #[test]
    fn test_output_paths() {
        assert_eq!(
            GenerationJob::get_output_path(Path::new("samples/flowers.png")),
            PathBuf::from("samples/flowers_result.png")
        );
        assert_eq!(
            GenerationJob::get_output_path(Path::new("rules.xml")),
            PathBuf::from("rules_result.png")
        );
        assert_eq!(
            GenerationJob::get_visualization_path(Path::new("out/a_result.png")),
            PathBuf::from("out/a_result.gif")
        );
    }

    // Tests an overlapping run reproduces a checkerboard and writes both outputs
    // Verified by rendering cells from the wrong pattern sample
    #[test]
    fn test_overlapping_run_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let sample = temp_dir.path().join("checker.png");
        write_checker(&sample);
        let output = temp_dir.path().join("out").join("checker.png");

        let outcome = job(&[
            "tilecollapse",
            "overlapping",
            arg(&sample),
            "-n",
            "2",
            "--periodic-input",
            "-w",
            "8",
            "-H",
            "6",
            "-p",
            "-q",
            "--visualize",
            "-o",
            arg(&output),
        ])
        .run()
        .unwrap();
        assert!(outcome.is_completed());

        let result = image::open(&output).unwrap().to_rgba8();
        assert_eq!(result.dimensions(), (8, 6));
        for (x, y, pixel) in result.enumerate_pixels() {
            let expected = result.get_pixel((x + 1) % 8, y);
            assert_ne!(pixel, expected, "({x}, {y})");
            assert!(pixel.0 == RED || pixel.0 == BLUE);
        }
        assert!(output.with_extension("gif").is_file());
    }

    // Tests a tiled run places whole tiles and uses the default output name
    // Verified by scaling the output by cells instead of tile size
    #[test]
    fn test_tiled_run_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let rules = temp_dir.path().join("meadow.xml");
        std::fs::write(
            &rules,
            r#"<set>
                 <tiles><tile name="grass" symmetry="X"/></tiles>
                 <neighbors><neighbor left="grass" right="grass"/></neighbors>
               </set>"#,
        )
        .unwrap();
        let grass: RgbaImage = ImageBuffer::from_pixel(3, 3, Rgba([40, 160, 40, 255]));
        grass.save(temp_dir.path().join("grass.png")).unwrap();

        let outcome = job(&[
            "tilecollapse",
            "tiled",
            arg(&rules),
            "-w",
            "4",
            "-H",
            "2",
            "-q",
        ])
        .run()
        .unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                attempts: 1,
                cycles: 8
            }
        );

        let result = image::open(temp_dir.path().join("meadow_result.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(result.dimensions(), (12, 6));
        assert!(result.pixels().all(|pixel| pixel.0 == [40, 160, 40, 255]));
    }

    // Tests invalid inputs fail before any generation starts
    // Verified by skipping the pattern size bounds check
    #[test]
    fn test_run_rejects_bad_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let sample = temp_dir.path().join("checker.png");
        write_checker(&sample);

        for size in ["0", "9"] {
            let result = job(&["tilecollapse", "overlapping", arg(&sample), "-n", size, "-q"]).run();
            assert!(matches!(
                result,
                Err(AlgorithmError::InvalidParameter { .. })
            ));
        }

        let missing = temp_dir.path().join("missing.xml");
        let result = job(&["tilecollapse", "tiled", arg(&missing), "-q"]).run();
        assert!(matches!(result, Err(AlgorithmError::FileSystem { .. })));

        let result = job(&["tilecollapse", "overlapping", arg(&missing), "-q"]).run();
        assert!(matches!(result, Err(AlgorithmError::ImageLoad { .. })));
    }
}
