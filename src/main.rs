use {
    anyhow::{Context, Result},
    seqls::{
        listing::{
            self, ByWhat, ListOptions, PathPrefix, SeqFormat, Tense, TimeCompare, WhichFiles,
        },
        seq_split,
    },
    std::{
        env,
        io::{self, Write},
        path::Path,
    },
    structopt::StructOpt,
};

/// List directory contents while condensing image sequences to one entry
/// each. Filenames that are part of an image sequence are assumed to be
/// of the form <name>.<frame>.<ext>, where <ext> is drawn from a list of
/// image extensions overridable with SEQLS_IMAGE_EXTENSION=exr:jpg:tif
/// (and SEQLS_MOV_EXTENSION, SEQLS_CACHE_EXTENSION likewise).
#[derive(Debug, StructOpt)]
#[structopt(name = "seqls")]
struct Opt {
    /// List image sequences in one of the formats 'native', 'nuke', 'rv',
    /// 'shake', 'glob', 'mplay' or 'houdini'. glob only prints correct
    /// results for padded frame numbers, and problem-frame reporting only
    /// happens in the native format.
    #[structopt(
        long,
        short = "f",
        default_value = "native",
        value_name = "FORMAT",
        possible_values = &["native", "nuke", "rv", "shake", "glob", "mplay", "houdini"]
    )]
    format: SeqFormat,

    /// Show the list of missing frames as 'm:[<list>]' [default].
    #[structopt(long, short = "m")]
    show_missing: bool,

    /// Do not show the list of missing frames.
    #[structopt(long, short = "M")]
    skip_missing: bool,

    /// Show the list of zero length images as 'z:[<list>]' [default].
    #[structopt(long, short = "z")]
    show_zero: bool,

    /// Do not show the list of zero length images.
    #[structopt(long, short = "Z")]
    skip_zero: bool,

    /// Show potentially bad frames, smaller than the minimum size of a
    /// good frame (see --good-frame-min-size), as 'b:[<list>]'.
    #[structopt(long, short = "b")]
    show_bad_frames: bool,

    /// Do not show the list of potentially bad frames [default].
    #[structopt(long, short = "B")]
    skip_bad_frames: bool,

    /// Any frame smaller than BYTES is a bad frame. Short forms are
    /// accepted as in '1K' (1024) or '1.5K'.
    #[structopt(
        long,
        default_value = "512",
        value_name = "BYTES",
        parse(try_from_str = listing::parse_byte_size)
    )]
    good_frame_min_size: u64,

    /// Show badly padded frame numbers, padded when they should not be or
    /// not padded when they should be, as 'p:[<list>]' [default].
    #[structopt(long, short = "g")]
    show_bad_padding: bool,

    /// Do not show the list of badly padded frames.
    #[structopt(long, short = "G")]
    skip_bad_padding: bool,

    /// Combine the missing, zero, bad and badly padded lists into one
    /// list, shown as 'e:[<list>]'.
    #[structopt(long, short = "c")]
    combine_lists: bool,

    /// Do not combine the error lists [default].
    #[structopt(long)]
    no_combine_lists: bool,

    /// Skip printing all error lists. A --show-* option given alongside
    /// re-enables only that list.
    #[structopt(long, short = "n")]
    no_error_lists: bool,

    /// Only list the first and last image, on a separate line each.
    /// Implies --prepend-path-abs (unless --prepend-path-rel is given)
    /// and strictly images only.
    #[structopt(long, short = "e")]
    extremes: bool,

    /// Print the image, cache and movie extension lists and exit.
    #[structopt(long, short = "i")]
    img_ext: bool,

    /// Also allow '_' (underscore) as the separator between the name and
    /// the frame number, i.e. <name>_<frame>.<ext>.
    #[structopt(long, short = "l")]
    loose_num_separator: bool,

    /// Strictly use '.' (dot) as the separator between the name and the
    /// frame number [default].
    #[structopt(long, short = "s")]
    strict_num_separator: bool,

    /// Only list image sequences, cache sequences and movies.
    #[structopt(long, short = "o")]
    only_sequences: bool,

    /// Strictly list only image sequences (no movies or caches).
    #[structopt(long, short = "O")]
    only_images: bool,

    /// Strictly list only movies (no images or caches).
    #[structopt(long)]
    only_movies: bool,

    /// Strictly list only cache sequences (no images or movies).
    #[structopt(long)]
    only_caches: bool,

    /// Prepend the absolute path name to the image name. Implies
    /// --only-sequences and suppresses directory name headers.
    #[structopt(long, short = "p")]
    prepend_path_abs: bool,

    /// Prepend the relative path name to the image name. Implies
    /// --only-sequences and suppresses directory name headers.
    #[structopt(long, short = "P")]
    prepend_path_rel: bool,

    /// List one non-sequence entry per line (see ls(1)).
    #[structopt(long = "single", short = "1")]
    single: bool,

    /// Do not ignore entries starting with '.'.
    #[structopt(long = "all", short = "a")]
    all: bool,

    /// List non-sequence entries by columns (see ls(1)).
    #[structopt(long, short = "C")]
    by_columns: bool,

    /// List non-sequence entries by lines instead of by columns (see ls(1)).
    #[structopt(long, short = "x")]
    by_rows: bool,

    /// List directory entries instead of contents (see ls(1)).
    #[structopt(long = "directory", short = "d")]
    directory: bool,

    /// Append an indicator (one of */=>@|) to non-sequence entries (see ls(1)).
    #[structopt(long, short = "F")]
    classify: bool,

    /// Reverse order while sorting.
    #[structopt(long, short = "r")]
    reverse: bool,

    /// List subdirectories recursively.
    #[structopt(long, short = "R")]
    recursive: bool,

    /// Which frame to compare times with when sorting sequences by time,
    /// one of 'oldest', 'median' or 'newest'.
    #[structopt(
        long,
        default_value = "newest",
        value_name = "FRAME_AGE",
        possible_values = &["oldest", "median", "newest"]
    )]
    time: TimeCompare,

    /// Sort by modification time, newest first (see --time) (see ls(1)).
    #[structopt(short = "t")]
    sort_by_mtime: bool,

    /// Only list sequences modified before or since the given time, where
    /// TENSE is 'before' or 'since' and the time is [[CC]YY]MMDDhhmm[.ss]
    /// in local time. --time picks the frame used for the comparison.
    #[structopt(long, number_of_values = 2, value_names = &["TENSE", "TIME"])]
    only_show: Option<Vec<String>>,

    /// Be verbose (debug messages). You can also set the RUST_LOG env var
    /// for finer control.
    #[structopt(short = "v", long)]
    verbose: bool,

    /// File names.
    #[structopt(name = "FILE")]
    files: Vec<String>,
}

fn resolve_toggle(show: bool, skip: bool, clear_all: bool, default: bool) -> bool {
    if show {
        true
    } else if skip || clear_all {
        false
    } else {
        default
    }
}

fn build_options(opt: &Opt) -> Result<ListOptions> {
    let mut which_files = if opt.only_images {
        WhichFiles::OnlyImages
    } else if opt.only_movies {
        WhichFiles::OnlyMovies
    } else if opt.only_caches {
        WhichFiles::OnlyCaches
    } else if opt.only_sequences {
        WhichFiles::OnlySeqs
    } else {
        WhichFiles::All
    };

    let mut prepend_path = if opt.prepend_path_rel {
        PathPrefix::Rel
    } else if opt.prepend_path_abs {
        PathPrefix::Abs
    } else {
        PathPrefix::None
    };

    if prepend_path != PathPrefix::None && which_files == WhichFiles::All {
        which_files = WhichFiles::OnlySeqs;
    }

    let mut show_missing =
        resolve_toggle(opt.show_missing, opt.skip_missing, opt.no_error_lists, true);
    let mut show_zero = resolve_toggle(opt.show_zero, opt.skip_zero, opt.no_error_lists, true);
    let mut show_bad = resolve_toggle(
        opt.show_bad_frames,
        opt.skip_bad_frames,
        opt.no_error_lists,
        false,
    );
    let mut show_bad_padding = resolve_toggle(
        opt.show_bad_padding,
        opt.skip_bad_padding,
        opt.no_error_lists,
        true,
    );

    let mut format = opt.format;
    if opt.extremes {
        if prepend_path == PathPrefix::None {
            prepend_path = PathPrefix::Abs;
        }
        show_missing = false;
        show_zero = false;
        show_bad = false;
        show_bad_padding = false;
        format = SeqFormat::Native;
        if which_files == WhichFiles::All {
            which_files = WhichFiles::OnlyImages;
        }
    }

    let cutoff = match &opt.only_show {
        Some(vals) => {
            let tense: Tense = vals[0]
                .parse()
                .map_err(|e: String| anyhow::anyhow!("argument --only-show: {}", e))?;
            let time = listing::parse_cutoff_time(&vals[1])
                .map_err(|e| anyhow::anyhow!("argument --only-show: {}", e))?;
            Some((tense, time))
        }
        None => None,
    };

    let by_what = if opt.single {
        ByWhat::Single
    } else if opt.by_columns {
        ByWhat::Columns
    } else if opt.by_rows {
        ByWhat::Rows
    } else {
        ByWhat::Unspecified
    };

    Ok(ListOptions {
        format,
        show_missing,
        show_zero,
        show_bad,
        show_bad_padding,
        good_frame_min_size: opt.good_frame_min_size,
        combine_error_frames: opt.combine_lists && !opt.no_combine_lists,
        extremes: opt.extremes,
        strict_separator: !opt.loose_num_separator || opt.strict_num_separator,
        which_files,
        prepend_path,
        by_what,
        ignore_dot_files: !opt.all,
        list_dir_contents: !opt.directory,
        classify: opt.classify,
        reverse: opt.reverse,
        recursive: opt.recursive,
        time_compare: opt.time,
        sort_by_mtime: opt.sort_by_mtime,
        cutoff,
    })
}

fn run() -> Result<()> {
    let opt = Opt::from_args();

    if opt.verbose {
        env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    if opt.img_ext {
        println!(
            "{}: {}",
            seq_split::IMAGE_EXT_VAR,
            seq_split::image_extensions().join(":")
        );
        println!(
            "{}: {}",
            seq_split::MOV_EXT_VAR,
            seq_split::mov_extensions().join(":")
        );
        println!(
            "{}: {}",
            seq_split::CACHE_EXT_VAR,
            seq_split::cache_extensions().join(":")
        );
        return Ok(());
    }

    let opts = build_options(&opt)?;
    log::debug!("Listing with {:?}", opts);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opt.files.is_empty() {
        if !opts.list_dir_contents {
            if opts.which_files == WhichFiles::All {
                writeln!(out, ".")?;
            }
        } else {
            let mut passed = String::new();
            if opts.recursive {
                if opts.prepend_path == PathPrefix::None {
                    writeln!(out, ".:")?;
                }
                passed = "./".to_owned();
            }
            if opts.prepend_path == PathPrefix::Abs {
                passed = format!("{}/", env::current_dir()?.display());
            }
            let contents = listing::read_dir_names(Path::new("."), opts.ignore_dot_files)
                .context("Failed to list the current directory")?;
            listing::list_seq_dir(&contents, Path::new("."), false, &opts, &passed, &mut out)?;
        }
    } else if opt.files.len() == 1
        && Path::new(&opt.files[0]).is_dir()
        && opts.prepend_path != PathPrefix::Abs
    {
        // Listing a single directory needs no name header, matching ls.
        let arg0 = opt.files[0].strip_suffix('/').unwrap_or(&opt.files[0]);
        if !opts.list_dir_contents {
            writeln!(out, "{}", arg0)?;
        } else {
            let mut passed = String::new();
            if opts.recursive {
                if opts.prepend_path == PathPrefix::None {
                    writeln!(out, "{}:", arg0)?;
                }
                passed = format!("{}/", arg0);
            }
            if opts.prepend_path == PathPrefix::Rel {
                passed = format!("{}/", arg0);
            }
            if arg0.starts_with('/') {
                passed = format!("{}/", arg0);
            }
            let contents = listing::read_dir_names(Path::new(arg0), opts.ignore_dot_files)
                .with_context(|| format!("Failed to list {}", arg0))?;
            listing::list_seq_dir(&contents, Path::new(arg0), false, &opts, &passed, &mut out)?;
        }
    } else {
        let passed = if opts.prepend_path == PathPrefix::Abs {
            format!("{}/", env::current_dir()?.display())
        } else {
            String::new()
        };
        listing::list_seq_dir(&opt.files, Path::new("."), true, &opts, &passed, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    if let Some(listing::Error::Write(e)) = err.downcast_ref::<listing::Error>() {
        return e.kind() == io::ErrorKind::BrokenPipe;
    }
    if let Some(e) = err.downcast_ref::<io::Error>() {
        return e.kind() == io::ErrorKind::BrokenPipe;
    }
    false
}

fn main() -> Result<()> {
    match run() {
        // A downstream head or less going away is not an error.
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}
