use {
    crate::{
        seq_lister::condense_seq,
        seq_split::{actual_image_name, is_cache, is_movie, seq_split, split_image_name},
    },
    chrono::TimeZone,
    std::{
        cmp::Ordering,
        collections::BTreeMap,
        fs,
        io::{self, Write},
        path::Path,
        process::Command,
        str::FromStr,
        time::{SystemTime, UNIX_EPOCH},
    },
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed reading a directory")]
    ReadDir(io::Error),

    #[error("Failed writing the listing output")]
    Write(io::Error),

    #[error("Failed running the ls utility")]
    Ls(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// Mirrors what ls stores for sequence-less files, a movie with a broken
// soft link sorts before everything real.
const BROKEN_LINK_MTIME: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqFormat {
    Native,
    Nuke,
    Rv,
    Shake,
    Glob,
    Houdini,
    Mplay,
}

impl FromStr for SeqFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "native" => Ok(SeqFormat::Native),
            "nuke" => Ok(SeqFormat::Nuke),
            "rv" => Ok(SeqFormat::Rv),
            "shake" => Ok(SeqFormat::Shake),
            "glob" => Ok(SeqFormat::Glob),
            "houdini" => Ok(SeqFormat::Houdini),
            "mplay" => Ok(SeqFormat::Mplay),
            _ => Err(format!("unknown sequence format {:?}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPrefix {
    None,
    Abs,
    Rel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhichFiles {
    All,
    OnlySeqs,
    OnlyImages,
    OnlyMovies,
    OnlyCaches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByWhat {
    Unspecified,
    Single,
    Columns,
    Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCompare {
    Oldest,
    Median,
    Newest,
}

impl FromStr for TimeCompare {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "oldest" => Ok(TimeCompare::Oldest),
            "median" => Ok(TimeCompare::Median),
            "newest" => Ok(TimeCompare::Newest),
            _ => Err(format!("unknown time comparison {:?}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tense {
    Before,
    Since,
}

impl FromStr for Tense {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "before" => Ok(Tense::Before),
            "since" => Ok(Tense::Since),
            _ => Err("TENSE must be 'since' or 'before'".to_owned()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub format: SeqFormat,
    pub show_missing: bool,
    pub show_zero: bool,
    pub show_bad: bool,
    pub show_bad_padding: bool,
    pub good_frame_min_size: u64,
    pub combine_error_frames: bool,
    pub extremes: bool,
    pub strict_separator: bool,
    pub which_files: WhichFiles,
    pub prepend_path: PathPrefix,
    pub by_what: ByWhat,
    pub ignore_dot_files: bool,
    pub list_dir_contents: bool,
    pub classify: bool,
    pub reverse: bool,
    pub recursive: bool,
    pub time_compare: TimeCompare,
    pub sort_by_mtime: bool,
    pub cutoff: Option<(Tense, f64)>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            format: SeqFormat::Native,
            show_missing: true,
            show_zero: true,
            show_bad: false,
            show_bad_padding: true,
            good_frame_min_size: 512,
            combine_error_frames: false,
            extremes: false,
            strict_separator: true,
            which_files: WhichFiles::All,
            prepend_path: PathPrefix::None,
            by_what: ByWhat::Unspecified,
            ignore_dot_files: true,
            list_dir_contents: true,
            classify: false,
            reverse: false,
            recursive: false,
            time_compare: TimeCompare::Newest,
            sort_by_mtime: false,
            cutoff: None,
        }
    }
}

/// One frame of a sequence as found on disk. `mtime` is `None` for a
/// broken soft link. `padding` is the length of the frame number text in
/// the filename, sign included.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub num: i64,
    pub size: u64,
    pub mtime: Option<f64>,
    pub padding: usize,
}

/// Accepts plain byte counts as well as the short forms `1K`, `1.5M`,
/// `2G`. Zero and below fall back to the 512 byte default.
pub fn parse_byte_size(s: &str) -> std::result::Result<u64, String> {
    let (num, multiplier) = match s.chars().last() {
        Some('K') | Some('k') => (&s[..s.len() - 1], 1u64 << 10),
        Some('M') | Some('m') => (&s[..s.len() - 1], 1u64 << 20),
        Some('G') | Some('g') => (&s[..s.len() - 1], 1u64 << 30),
        _ => (s, 1),
    };
    match num.parse::<f64>() {
        Ok(b) if b <= 0.0 => Ok(512),
        Ok(b) => Ok((b * multiplier as f64).ceil() as u64),
        Err(_) => Err(format!("{:?} is not a valid byte size", s)),
    }
}

/// Parses the `--only-show` cutoff, `[[CC]YY]MMDDhhmm[.ss]` in local
/// time, into epoch seconds.
pub fn parse_cutoff_time(s: &str) -> std::result::Result<f64, String> {
    const BAD: &str = "the time must be of the form [[CC]YY]MMDDhhmm[.ss]";
    let mut pieces = s.splitn(2, '.');
    let date = pieces.next().unwrap_or("");
    let seconds = pieces.next();

    let (mut datetime, mut fmt) = match date.len() {
        12 => (date.to_owned(), "%Y%m%d%H%M".to_owned()),
        10 => (date.to_owned(), "%y%m%d%H%M".to_owned()),
        8 => (format!("1900{}", date), "%Y%m%d%H%M".to_owned()),
        _ => return Err(BAD.to_owned()),
    };
    if let Some(ss) = seconds {
        datetime.push('.');
        datetime.push_str(ss);
        fmt.push_str(".%S");
    }

    let naive =
        chrono::NaiveDateTime::parse_from_str(&datetime, &fmt).map_err(|_| BAD.to_owned())?;
    match chrono::Local.from_local_datetime(&naive).earliest() {
        Some(t) => Ok(t.timestamp() as f64),
        None => Err(BAD.to_owned()),
    }
}

/// Reads the names in a directory, hiding dot files when asked to.
pub fn read_dir_names(path: &Path, ignore_dot_files: bool) -> Result<Vec<String>> {
    let entries = fs::read_dir(path).map_err(Error::ReadDir)?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(Error::ReadDir)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore_dot_files && name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Lists `dir_contents` (names resolved against `path`), condensing image
/// and cache sequences to one entry each and delegating everything else
/// to ls. `list_sub_dirs` is only true for the top level call on an
/// explicit file list, it buys exactly one level of directory descent
/// unless the options ask for full recursion.
pub fn list_seq_dir(
    dir_contents: &[String],
    path: &Path,
    list_sub_dirs: bool,
    opts: &ListOptions,
    traversed_path: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let mut images: BTreeMap<String, Vec<FrameInfo>> = BTreeMap::new();
    let mut caches: BTreeMap<String, Vec<FrameInfo>> = BTreeMap::new();
    let mut movies: BTreeMap<String, Option<f64>> = BTreeMap::new();
    let mut other_files: Vec<String> = Vec::new();
    let mut dir_list: Vec<String> = Vec::new();

    for filename in dir_contents {
        let full = path.join(filename);

        // A directory is never part of a sequence, whatever it is called.
        if full.is_dir() {
            if (!list_sub_dirs || !opts.list_dir_contents)
                && opts.which_files == WhichFiles::All
            {
                other_files.push(filename.clone());
            }
            dir_list.push(filename.clone());
            continue;
        }

        let split = seq_split(filename, opts.strict_separator)
            .and_then(|s| s.frame.parse::<i64>().ok().map(|num| (s, num)));
        if let Some((seq, num)) = split {
            let padding = seq.frame.len();
            let (size, mtime) = match fs::metadata(&full) {
                Ok(md) => (md.len(), md.modified().ok().map(epoch_secs)),
                Err(_) => (0, None), // broken soft link
            };
            let info = FrameInfo {
                num,
                size,
                mtime,
                padding,
            };
            if is_cache(&seq.key) {
                caches.entry(seq.key).or_default().push(info);
            } else {
                images.entry(seq.key).or_default().push(info);
            }
        } else if is_movie(filename) {
            let mtime = fs::metadata(&full)
                .ok()
                .and_then(|md| md.modified().ok())
                .map(epoch_secs);
            movies.insert(filename.clone(), mtime);
        } else if opts.which_files == WhichFiles::All {
            other_files.push(filename.clone());
        }
    }

    log::debug!(
        "Found {} image, {} cache, {} movie sequences under {}",
        images.len(),
        caches.len(),
        movies.len(),
        path.display()
    );

    let mut something_printed = false;

    // ls already prints non-sequence files nicely.
    if !other_files.is_empty() {
        other_files.sort();
        let mut ls = Command::new("ls");
        ls.arg("-d");
        if opts.classify {
            ls.arg("-F");
        }
        match opts.by_what {
            ByWhat::Single => {
                ls.arg("-1");
            }
            ByWhat::Columns => {
                ls.arg("-C");
            }
            ByWhat::Rows => {
                ls.arg("-x");
            }
            ByWhat::Unspecified => {}
        }
        if opts.sort_by_mtime {
            ls.arg("-t");
        }
        if opts.reverse {
            ls.arg("-r");
        }
        ls.arg("--");
        ls.args(&other_files);
        ls.current_dir(path);
        out.flush().map_err(Error::Write)?;
        log::debug!("Delegating {} entries to ls", other_files.len());
        let status = ls.status().map_err(Error::Ls)?;
        if !status.success() {
            log::debug!("ls exited with {}", status);
        }
        something_printed = true;
    }

    for frames in images.values_mut().chain(caches.values_mut()) {
        frames.sort_by_key(|f| f.num);
    }

    let mut seq_keys: Vec<String> = match opts.which_files {
        WhichFiles::OnlyImages => images.keys().cloned().collect(),
        WhichFiles::OnlyMovies => movies.keys().cloned().collect(),
        WhichFiles::OnlyCaches => caches.keys().cloned().collect(),
        _ => {
            let mut keys: Vec<String> = images.keys().cloned().collect();
            keys.extend(movies.keys().cloned());
            keys.extend(caches.keys().cloned());
            keys
        }
    };

    let mut time_list: Vec<(String, f64)> = Vec::new();
    if opts.sort_by_mtime || opts.cutoff.is_some() {
        for key in &seq_keys {
            let mtime = if let Some(m) = movies.get(key) {
                m.unwrap_or(BROKEN_LINK_MTIME)
            } else if let Some(frames) = caches.get(key) {
                seq_mtime(frames, opts.time_compare)
            } else if let Some(frames) = images.get(key) {
                seq_mtime(frames, opts.time_compare)
            } else {
                0.0
            };
            time_list.push((key.clone(), mtime));
        }
    }

    if opts.sort_by_mtime {
        time_list.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        // ls -t prints newest first, ls -tr newest last.
        if !opts.reverse {
            time_list.reverse();
        }
        for (key, mtime) in &time_list {
            if cutoff_excludes(opts, *mtime) {
                continue;
            }
            print_entry(key, &images, &caches, &movies, opts, traversed_path, out)
                .map_err(Error::Write)?;
            something_printed = true;
        }
    } else if opts.cutoff.is_some() {
        time_list.sort_by(|a, b| a.0.cmp(&b.0));
        if !opts.reverse {
            time_list.reverse();
        }
        for (key, mtime) in &time_list {
            if cutoff_excludes(opts, *mtime) {
                continue;
            }
            print_entry(key, &images, &caches, &movies, opts, traversed_path, out)
                .map_err(Error::Write)?;
            something_printed = true;
        }
    } else {
        seq_keys.sort();
        if opts.reverse {
            seq_keys.reverse();
        }
        for key in &seq_keys {
            print_entry(key, &images, &caches, &movies, opts, traversed_path, out)
                .map_err(Error::Write)?;
            something_printed = true;
        }
    }

    let mut first_dir = true;
    if (list_sub_dirs || opts.recursive) && opts.list_dir_contents {
        dir_list.sort();
        for dir_name in &dir_list {
            let name = dir_name.strip_suffix('/').unwrap_or(dir_name);
            if opts.prepend_path == PathPrefix::None {
                if something_printed || !first_dir {
                    writeln!(out).map_err(Error::Write)?;
                }
                first_dir = false;
                if opts.recursive {
                    writeln!(out, "{}{}:", traversed_path, name).map_err(Error::Write)?;
                } else {
                    writeln!(out, "{}:", name).map_err(Error::Write)?;
                }
            }
            let passed = if name.starts_with('/') {
                format!("{}/", name)
            } else {
                format!("{}{}/", traversed_path, name)
            };
            let sub_path = path.join(name);
            let contents = read_dir_names(&sub_path, opts.ignore_dot_files)?;
            list_seq_dir(&contents, &sub_path, false, opts, &passed, out)?;
        }
    }

    Ok(())
}

fn cutoff_excludes(opts: &ListOptions, mtime: f64) -> bool {
    match opts.cutoff {
        Some((Tense::Before, t)) => mtime >= t,
        Some((Tense::Since, t)) => mtime <= t,
        None => false,
    }
}

fn print_entry(
    key: &str,
    images: &BTreeMap<String, Vec<FrameInfo>>,
    caches: &BTreeMap<String, Vec<FrameInfo>>,
    movies: &BTreeMap<String, Option<f64>>,
    opts: &ListOptions,
    traversed: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    if movies.contains_key(key) {
        if opts.prepend_path != PathPrefix::None {
            write!(out, "{}", traversed)?;
        }
        writeln!(out, "{}", key)
    } else if let Some(frames) = caches.get(key) {
        print_seq(key, frames, opts, traversed, out)
    } else if let Some(frames) = images.get(key) {
        print_seq(key, frames, opts, traversed, out)
    } else {
        Ok(())
    }
}

// Padding comes from the smallest non-negative frame. When every frame
// is negative the largest one works just as well, one and two digit
// padding being the same for negative numbers.
fn seq_padding(frames: &[FrameInfo]) -> usize {
    if frames[0].num >= 0 {
        frames[0].padding
    } else if frames[frames.len() - 1].num < 0 {
        frames[frames.len() - 1].padding
    } else {
        frames
            .iter()
            .find(|f| f.num >= 0)
            .map(|f| f.padding)
            .unwrap_or(1)
    }
}

fn pad_chars(padding: usize) -> String {
    if padding == 4 {
        "#".to_owned()
    } else {
        "@".repeat(padding)
    }
}

// Renders one sequence. `frames` is sorted by frame number.
fn print_seq(
    key: &str,
    frames: &[FrameInfo],
    opts: &ListOptions,
    traversed: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    let (root, ext) = split_image_name(key);
    let min_frame = frames[0].num;
    let max_frame = frames[frames.len() - 1].num;
    let padding = seq_padding(frames);
    let pad_num = |n: i64| format!("{:0w$}", n, w = padding);
    let prefixed = opts.prepend_path != PathPrefix::None && !root.starts_with('/');

    match opts.format {
        SeqFormat::Nuke => {
            let num = if min_frame == max_frame {
                pad_num(min_frame)
            } else {
                format!("%0{}d", padding)
            };
            if prefixed {
                write!(out, "{}", traversed)?;
            }
            write!(out, "{}{}.{}", root, num, ext)?;
            return if min_frame == max_frame {
                writeln!(out)
            } else {
                writeln!(out, " {}-{}", min_frame, max_frame)
            };
        }

        SeqFormat::Shake => {
            if min_frame == max_frame {
                write!(out, "shake ")?;
            } else {
                write!(out, "shake -t {}-{} ", min_frame, max_frame)?;
            }
            if prefixed {
                write!(out, "{}", traversed)?;
            }
            let num = if min_frame == max_frame {
                pad_num(min_frame)
            } else {
                pad_chars(padding)
            };
            return writeln!(out, "{}{}.{}", root, num, ext);
        }

        SeqFormat::Glob => {
            let mut pattern = String::from(if min_frame < 0 { "[\\-0-9]" } else { "[0-9]" });
            for _ in 1..padding {
                pattern.push_str("[0-9]");
            }
            if prefixed {
                write!(out, "{}", traversed)?;
            }
            return writeln!(out, "{}{}.{}", root, pattern, ext);
        }

        SeqFormat::Houdini | SeqFormat::Mplay => {
            let num = if min_frame == max_frame {
                pad_num(min_frame)
            } else {
                let dollar = if opts.format == SeqFormat::Mplay {
                    "\\$F"
                } else {
                    "$F"
                };
                if padding >= 2 {
                    format!("{}{}", dollar, padding)
                } else {
                    dollar.to_owned()
                }
            };
            if prefixed {
                write!(out, "{}", traversed)?;
            }
            return writeln!(out, "{}{}.{}", root, num, ext);
        }

        SeqFormat::Rv => {
            let num = if min_frame == max_frame {
                pad_num(min_frame)
            } else {
                format!("{}-{}{}", min_frame, max_frame, pad_chars(padding))
            };
            if prefixed {
                write!(out, "{}", traversed)?;
            }
            return writeln!(out, "{}{}.{}", root, num, ext);
        }

        SeqFormat::Native => {}
    }

    // Problem frame lists are gathered for native listings only.
    let mut missing = Vec::new();
    let mut zero = Vec::new();
    let mut bad = Vec::new();
    let mut bad_pad = Vec::new();
    if opts.show_missing || opts.show_zero || opts.show_bad || opts.show_bad_padding {
        let mut idx = 0;
        let mut i = min_frame;
        while i <= max_frame {
            let curr = &frames[idx];
            let mut i_missing = false;
            if i != curr.num {
                i_missing = true;
                if opts.show_missing {
                    missing.push(i);
                }
            } else {
                idx += 1;
            }

            if !i_missing && (opts.show_zero || opts.show_bad || opts.show_bad_padding) {
                if curr.mtime.is_none() {
                    if opts.show_zero {
                        zero.push(i);
                    } else if opts.show_bad {
                        bad.push(i);
                    }
                    eprintln!(
                        "seqls: warning: {} is a broken soft link",
                        actual_image_name(key, padding, i)
                    );
                } else if opts.show_zero && curr.size == 0 {
                    zero.push(i);
                } else if opts.show_bad && curr.size < opts.good_frame_min_size {
                    bad.push(i);
                }

                // Padded beyond both its own digit count and the sequence
                // width, or short of the sequence width.
                if opts.show_bad_padding
                    && ((curr.padding > i.to_string().len() && curr.padding > padding)
                        || curr.padding < padding)
                {
                    bad_pad.push(i);
                }
            }
            i += 1;
        }
    }

    if prefixed {
        write!(out, "{}", traversed)?;
    }

    if opts.extremes {
        write!(out, "{}{}.{}", root, pad_num(min_frame), ext)?;
        if min_frame != max_frame {
            writeln!(out)?;
            if !root.starts_with('/') {
                write!(out, "{}", traversed)?;
            }
            write!(out, "{}{}.{}", root, pad_num(max_frame), ext)?;
        }
    } else {
        let frame_range = if min_frame == max_frame {
            format!("[{}]", pad_num(min_frame))
        } else {
            format!("[{}-{}]", pad_num(min_frame), pad_num(max_frame))
        };
        write!(out, "{}{}.{}", root, frame_range, ext)?;
    }

    if opts.combine_error_frames {
        let mut all = missing;
        all.extend(zero);
        all.extend(bad);
        all.extend(bad_pad);
        write_frame_list(out, 'e', &all, false)?;
    } else {
        let mut printed = write_frame_list(out, 'm', &missing, false)?;
        printed |= write_frame_list(out, 'z', &zero, printed)?;
        printed |= write_frame_list(out, 'b', &bad, printed)?;
        write_frame_list(out, 'p', &bad_pad, printed)?;
    }
    writeln!(out)
}

fn write_frame_list(
    out: &mut dyn Write,
    label: char,
    frames: &[i64],
    prior: bool,
) -> io::Result<bool> {
    let condensed = condense_seq(frames, 1);
    if condensed.is_empty() {
        return Ok(false);
    }
    if prior {
        write!(out, ",")?;
    }
    write!(out, " {}:[{}]", label, condensed.join(","))?;
    Ok(true)
}

fn seq_mtime(frames: &[FrameInfo], compare: TimeCompare) -> f64 {
    let mut valid: Vec<f64> = frames.iter().filter_map(|f| f.mtime).collect();
    valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    match valid.len() {
        0 => 0.0,
        1 => valid[0],
        n => match compare {
            TimeCompare::Oldest => valid[0],
            TimeCompare::Median => {
                let mid = n / 2;
                if n % 2 == 1 {
                    valid[mid]
                } else {
                    (valid[mid] + valid[mid - 1]) / 2.0
                }
            }
            TimeCompare::Newest => valid[n - 1],
        },
    }
}

fn epoch_secs(t: SystemTime) -> f64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_sizes_accept_short_forms() {
        assert_eq!(parse_byte_size("512").unwrap(), 512);
        assert_eq!(parse_byte_size("1K").unwrap(), 1024);
        assert_eq!(parse_byte_size("1.5k").unwrap(), 1536);
        assert_eq!(parse_byte_size("2M").unwrap(), 2 << 20);
        assert_eq!(parse_byte_size("1G").unwrap(), 1 << 30);
    }

    #[test]
    fn byte_sizes_at_or_below_zero_use_the_default() {
        assert_eq!(parse_byte_size("0").unwrap(), 512);
        assert_eq!(parse_byte_size("-3").unwrap(), 512);
    }

    #[test]
    fn bad_byte_sizes_are_rejected() {
        assert!(parse_byte_size("abc").is_err());
        assert!(parse_byte_size("").is_err());
    }

    #[test]
    fn cutoff_times_parse_in_all_three_lengths() {
        assert!(parse_cutoff_time("202608071230").is_ok());
        assert!(parse_cutoff_time("2608071230").is_ok());
        assert!(parse_cutoff_time("08071230").is_ok());
        assert!(parse_cutoff_time("202608071230.45").is_ok());
    }

    #[test]
    fn bad_cutoff_times_are_rejected() {
        assert!(parse_cutoff_time("123").is_err());
        assert!(parse_cutoff_time("20260807123").is_err());
        assert!(parse_cutoff_time("202613071230").is_err());
        assert!(parse_cutoff_time("202608071230.4.5").is_err());
    }

    #[test]
    fn tense_parses_case_insensitively() {
        assert_eq!(Tense::from_str("Before").unwrap(), Tense::Before);
        assert_eq!(Tense::from_str("SINCE").unwrap(), Tense::Since);
        assert!(Tense::from_str("around").is_err());
    }

    fn frame(num: i64, mtime: f64) -> FrameInfo {
        FrameInfo {
            num,
            size: 1,
            mtime: Some(mtime),
            padding: 4,
        }
    }

    #[test]
    fn sequence_mtime_picks_the_requested_frame() {
        let frames = vec![frame(1, 10.0), frame(2, 30.0), frame(3, 20.0)];
        assert_eq!(seq_mtime(&frames, TimeCompare::Oldest), 10.0);
        assert_eq!(seq_mtime(&frames, TimeCompare::Median), 20.0);
        assert_eq!(seq_mtime(&frames, TimeCompare::Newest), 30.0);

        let even = vec![frame(1, 10.0), frame(2, 30.0)];
        assert_eq!(seq_mtime(&even, TimeCompare::Median), 20.0);
    }

    #[test]
    fn broken_links_are_skipped_when_comparing_times() {
        let frames = vec![
            FrameInfo {
                num: 1,
                size: 0,
                mtime: None,
                padding: 4,
            },
            frame(2, 15.0),
        ];
        assert_eq!(seq_mtime(&frames, TimeCompare::Newest), 15.0);
    }

    #[test]
    fn padding_follows_the_smallest_non_negative_frame() {
        let frames = vec![
            FrameInfo {
                num: -11,
                size: 1,
                mtime: Some(1.0),
                padding: 3,
            },
            FrameInfo {
                num: 0,
                size: 1,
                mtime: Some(1.0),
                padding: 5,
            },
            FrameInfo {
                num: 11,
                size: 1,
                mtime: Some(1.0),
                padding: 5,
            },
        ];
        assert_eq!(seq_padding(&frames), 5);
    }
}
