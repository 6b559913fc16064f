use crate::color::ByteColorMode;
use crate::geometry;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_decode_argument(command);
        let command = Self::register_color_mode_argument(command);
        let command = Self::register_invert_argument(command);
        let command = Self::register_resize_argument(command);
        let command = Self::register_ratio_argument(command);
        Self::register_fill_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_decode_argument(command: Command) -> Command {
        command.arg(Self::create_decode_argument())
    }

    fn register_color_mode_argument(command: Command) -> Command {
        command.arg(Self::create_color_mode_argument())
    }

    fn register_invert_argument(command: Command) -> Command {
        command.arg(Self::create_invert_argument())
    }

    fn register_resize_argument(command: Command) -> Command {
        command.arg(Self::create_resize_argument())
    }

    fn register_ratio_argument(command: Command) -> Command {
        command.arg(Self::create_ratio_argument())
    }

    fn register_fill_argument(command: Command) -> Command {
        command.arg(Self::create_fill_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to the file to render; standard input when omitted")
            .value_parser(value_parser!(PathBuf))
            .required(false)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output <FILE> "Path to the PNG output file")
            .default_value("output.png")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_decode_argument() -> Arg {
        arg!(decode: -d --decode "Decode a rendered PNG back into bytes (not yet implemented)")
    }

    fn create_color_mode_argument() -> Arg {
        arg!(color_mode: -m --color_mode <MODE> "Byte to color mapping")
            .default_value("greyscale")
            .value_parser(value_parser!(ByteColorMode))
    }

    fn create_invert_argument() -> Arg {
        arg!(invert: -i --invert "Invert the red, green and blue channels")
    }

    fn create_resize_argument() -> Arg {
        arg!(resize: -r --resize <DIMS> "Resize the output to WxH, e.g. 200x100").default_value("0x0")
    }

    fn create_ratio_argument() -> Arg {
        arg!(ratio: --ratio <RATIO> "Canvas height shrink ratio, in the range [0, 1)")
            .default_value("0.15")
            .value_parser(value_parser!(f64))
    }

    fn create_fill_argument() -> Arg {
        arg!(fill: --fill <BYTE> "Grey intensity for pixels past the end of input")
            .default_value("255")
            .value_parser(value_parser!(u8))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            decode: Self::extract_decode_argument(matches),
            color_mode: Self::extract_color_mode_argument(matches),
            invert: Self::extract_invert_argument(matches),
            resize: Self::extract_resize_argument(matches),
            ratio_pct: Self::extract_ratio_argument(matches),
            fill: Self::extract_fill_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("input_file").cloned()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Output file must be provided, but was unset")
            .clone()
    }

    fn extract_decode_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("decode")
    }

    fn extract_color_mode_argument(matches: &ArgMatches) -> ByteColorMode {
        matches
            .get_one::<ByteColorMode>("color_mode")
            .expect("Color mode must be provided, but was unset")
            .to_owned()
    }

    fn extract_invert_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("invert")
    }

    fn extract_resize_argument(matches: &ArgMatches) -> (u32, u32) {
        let dimensions = matches
            .get_one::<String>("resize")
            .expect("Resize dimensions must be provided, but were unset");
        geometry::parse_dimensions(dimensions)
    }

    fn extract_ratio_argument(matches: &ArgMatches) -> f64 {
        matches
            .get_one::<f64>("ratio")
            .expect("Ratio must be provided, but was unset")
            .to_owned()
    }

    fn extract_fill_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("fill")
            .expect("Fill value must be provided, but was unset")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::{ByteColorMode, CLIParser};

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "firmware.bin";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches)
            .expect("Input file should have been parsed");
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_absent_input_file_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert!(input_file.is_none(), "Absent input file must mean stdin");
    }

    #[test]
    fn parse_output_file_argument() {
        let output_file_name = "render.png";
        let command = Command::new("test");
        let command = CLIParser::register_output_file_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-o", output_file_name]);
        let output_file = CLIParser::extract_output_file_argument(&matches);
        assert_eq!(output_file.file_name().unwrap(), output_file_name);
    }

    #[test]
    fn parse_color_mode_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_color_mode_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--color_mode", "packed"]);
        let actual_mode = CLIParser::extract_color_mode_argument(&matches);
        assert_eq!(actual_mode, ByteColorMode::Packed);
    }

    #[test]
    fn parse_color_mode_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_color_mode_argument(command);
        let result =
            command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--color_mode", "sepia"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::InvalidValue);
        } else {
            panic!("Illegal value for color_mode not detected");
        }
    }

    #[test]
    fn parse_resize_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_resize_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--resize", "200x100"]);
        let resize = CLIParser::extract_resize_argument(&matches);
        assert_eq!(resize, (200, 100));
    }

    #[test]
    fn parse_malformed_resize_argument_means_no_resize() {
        let command = Command::new("test");
        let command = CLIParser::register_resize_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--resize", "bogus"]);
        let resize = CLIParser::extract_resize_argument(&matches);
        assert_eq!(resize, (0, 0));
    }

    #[test]
    fn parse_fill_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_fill_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--fill", "127"]);
        let fill = CLIParser::extract_fill_argument(&matches);
        assert_eq!(fill, 127);
    }

    #[test]
    fn parse_defaults_only() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(arguments.input_file.is_none(), "input file does not match");
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            "output.png",
            "output file does not match"
        );
        assert!(!arguments.decode, "decode does not match");
        assert_eq!(
            arguments.color_mode,
            ByteColorMode::Greyscale,
            "color_mode does not match"
        );
        assert!(!arguments.invert, "invert does not match");
        assert_eq!(arguments.resize, (0, 0), "resize does not match");
        assert_eq!(arguments.ratio_pct, 0.15, "ratio does not match");
        assert_eq!(arguments.fill, 255, "fill does not match");
    }

    #[test]
    fn parse_full_invocation() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![
            PROGRAM_NAME_ARGUMENT,
            "firmware.bin",
            "-o",
            "firmware.png",
            "--color_mode",
            "packed",
            "--invert",
            "--resize",
            "50x50",
            "--ratio",
            "0.25",
            "--fill",
            "0",
        ]);
        assert_eq!(
            arguments.input_file.as_ref().unwrap().file_name().unwrap(),
            "firmware.bin",
            "input file does not match"
        );
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            "firmware.png",
            "output file does not match"
        );
        assert_eq!(
            arguments.color_mode,
            ByteColorMode::Packed,
            "color_mode does not match"
        );
        assert!(arguments.invert, "invert does not match");
        assert_eq!(arguments.resize, (50, 50), "resize does not match");
        assert_eq!(arguments.ratio_pct, 0.25, "ratio does not match");
        assert_eq!(arguments.fill, 0, "fill does not match");
    }
}
