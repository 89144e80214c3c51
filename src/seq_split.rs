use {lazy_static::lazy_static, regex::Regex, std::env};

// Default extension sets. Overridable through the colon separated env
// variables SEQLS_IMAGE_EXTENSION, SEQLS_MOV_EXTENSION and
// SEQLS_CACHE_EXTENSION.
const DEFAULT_IMAGE_EXT: &[&str] = &[
    "alpha", "als", "anim", "bmp", "btf", "bw", "cin", "dib", "dpx", "exr", "gfa", "gif", "giff",
    "icon", "iff", "img", "int", "inta", "jpe", "jpeg", "jpg", "JPEG", "JPG", "mask", "matte",
    "nef", "NEF", "pct", "pct1", "pct2", "pdb", "pdd", "pic", "piclc", "picnc", "pict", "pix",
    "png", "psb", "psd", "rat", "raw", "rgb", "rgba", "rle", "rw2", "sgi", "tga", "tif", "tiff",
    "tpic",
];
const DEFAULT_MOV_EXT: &[&str] = &["avi", "mov", "mp4", "mpg", "wmv"];
const DEFAULT_CACHE_EXT: &[&str] = &[
    "ass", "dshd", "fur", "obj", "srf", "bgeo", "ifd", "vdb", "bgeo.sc", "bgeo.gz", "ifd.sc",
    "ifd.gz", "vdb.sc", "vdb.gz",
];

pub const IMAGE_EXT_VAR: &str = "SEQLS_IMAGE_EXTENSION";
pub const MOV_EXT_VAR: &str = "SEQLS_MOV_EXTENSION";
pub const CACHE_EXT_VAR: &str = "SEQLS_CACHE_EXTENSION";

lazy_static! {
    static ref IMAGE_EXT: Vec<String> = ext_set(IMAGE_EXT_VAR, DEFAULT_IMAGE_EXT);
    static ref MOV_EXT: Vec<String> = ext_set(MOV_EXT_VAR, DEFAULT_MOV_EXT);
    static ref CACHE_EXT: Vec<String> = ext_set(CACHE_EXT_VAR, DEFAULT_CACHE_EXT);
    static ref FRAME_NUM: Regex = Regex::new(r"^-?\d+$").unwrap();
}

fn ext_set(var: &str, defaults: &[&str]) -> Vec<String> {
    let mut exts: Vec<String> = match env::var(var) {
        Ok(ref val) if !val.is_empty() => val.split(':').map(str::to_owned).collect(),
        _ => defaults.iter().map(|e| (*e).to_owned()).collect(),
    };
    exts.sort();
    exts
}

pub fn image_extensions() -> &'static [String] {
    &IMAGE_EXT
}

pub fn mov_extensions() -> &'static [String] {
    &MOV_EXT
}

pub fn cache_extensions() -> &'static [String] {
    &CACHE_EXT
}

pub fn is_frame_num(s: &str) -> bool {
    FRAME_NUM.is_match(s)
}

/// A filename recognized as one frame of a sequence: the key is the name
/// with the frame number cut out (separator retained, e.g.
/// `a.b.c.001.exr` -> `a.b.c..exr`) and the frame number text keeps its
/// sign and padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqName {
    pub key: String,
    pub frame: String,
}

// Splits a filename on dots, keeping compound extensions such as
// "bgeo.sc" or "vdb.gz" in one piece.
fn split_file_components(filename: &str) -> Vec<String> {
    let mut parts: Vec<String> = filename.split('.').map(str::to_owned).collect();
    if parts.len() <= 1 {
        return parts;
    }
    let tail = format!("{}.{}", parts[parts.len() - 2], parts[parts.len() - 1]);
    if IMAGE_EXT.contains(&tail) || CACHE_EXT.contains(&tail) {
        parts.pop();
        let last = parts.len() - 1;
        parts[last] = tail;
    }
    parts
}

/// Recognizes `<name>.<frame>.<ext>` (and, when `strict_separator` is
/// off, `<name>_<frame>.<ext>`) for image and cache extensions. Returns
/// `None` for everything else.
pub fn seq_split(filename: &str, strict_separator: bool) -> Option<SeqName> {
    let mut parts = split_file_components(filename);
    if parts.len() <= 1 {
        return None;
    }

    let ext = parts[parts.len() - 1].clone();
    if !IMAGE_EXT.contains(&ext) && !CACHE_EXT.contains(&ext) {
        return None;
    }

    if !strict_separator {
        let stem = parts[parts.len() - 2].clone();
        let mut loose: Vec<&str> = stem.split('_').collect();
        if loose.len() > 1 && is_frame_num(loose[loose.len() - 1]) {
            let frame = loose.pop().unwrap().to_owned();
            let idx = parts.len() - 2;
            parts[idx] = format!("{}_", loose.join("_"));
            return Some(SeqName {
                key: parts.join("."),
                frame,
            });
        }
    }

    if parts.len() > 2 && is_frame_num(&parts[parts.len() - 2]) {
        let frame = parts.remove(parts.len() - 2);
        let idx = parts.len() - 2;
        parts[idx].push('.');
        return Some(SeqName {
            key: parts.join("."),
            frame,
        });
    }

    None
}

pub fn is_movie(filename: &str) -> bool {
    let parts: Vec<&str> = filename.split('.').collect();
    parts.len() > 1 && MOV_EXT.iter().any(|e| e == parts[parts.len() - 1])
}

pub fn is_cache(key: &str) -> bool {
    let (_, ext) = split_image_name(key);
    CACHE_EXT.contains(&ext)
}

/// Splits a sequence key back into its root (separator still attached)
/// and extension: `a.b.c..exr` -> (`a.b.c.`, `exr`).
pub fn split_image_name(key: &str) -> (String, String) {
    let mut parts = split_file_components(key);
    let sep;
    if parts[parts.len() - 2].is_empty() {
        sep = '.';
        let idx = parts.len() - 2;
        parts.remove(idx);
    } else {
        // Key uses the loose '_' separator, still attached to the stem.
        sep = '_';
        let idx = parts.len() - 2;
        let stem = parts[idx].clone();
        parts[idx] = stem[..stem.len() - 1].to_owned();
    }
    let ext = parts.pop().unwrap();
    let mut root = parts.join(".");
    root.push(sep);
    (root, ext)
}

/// Rebuilds the on-disk filename of one frame from its sequence key.
pub fn actual_image_name(key: &str, pad: usize, frame: i64) -> String {
    let (root, ext) = split_image_name(key);
    format!("{}{:0w$}.{}", root, frame, ext, w = pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_frame_numbers() {
        assert!(is_frame_num("001"));
        assert!(is_frame_num("-12"));
        assert!(!is_frame_num(""));
        assert!(!is_frame_num("12a"));
        assert!(!is_frame_num("--1"));
    }

    #[test]
    fn splits_strict_sequence_names() {
        let seq = seq_split("a.b.c.001.exr", true).unwrap();
        assert_eq!(seq.key, "a.b.c..exr");
        assert_eq!(seq.frame, "001");
    }

    #[test]
    fn splits_negative_frame_numbers() {
        let seq = seq_split("shot.-005.exr", true).unwrap();
        assert_eq!(seq.key, "shot..exr");
        assert_eq!(seq.frame, "-005");
    }

    #[test]
    fn splits_loose_sequence_names_only_when_asked() {
        assert_eq!(seq_split("a.b.c_001.exr", true), None);
        let seq = seq_split("a.b.c_001.exr", false).unwrap();
        assert_eq!(seq.key, "a.b.c_.exr");
        assert_eq!(seq.frame, "001");
    }

    #[test]
    fn keeps_compound_cache_extensions_whole() {
        let seq = seq_split("sim.0010.bgeo.sc", true).unwrap();
        assert_eq!(seq.key, "sim..bgeo.sc");
        assert_eq!(seq.frame, "0010");
        assert!(is_cache(&seq.key));
    }

    #[test]
    fn rejects_names_that_are_not_sequences() {
        assert_eq!(seq_split("notes.txt", true), None);
        assert_eq!(seq_split("README", true), None);
        assert_eq!(seq_split("plain.exr", true), None);
        assert_eq!(seq_split("001.exr", true), None);
        assert_eq!(seq_split("clip.001.mov", true), None);
    }

    #[test]
    fn recognizes_movies() {
        assert!(is_movie("cut.mov"));
        assert!(is_movie("cut.v2.mp4"));
        assert!(!is_movie("cut.exr"));
        assert!(!is_movie("mov"));
    }

    #[test]
    fn splits_keys_back_into_root_and_extension() {
        assert_eq!(
            split_image_name("a.b.c..exr"),
            ("a.b.c.".to_owned(), "exr".to_owned())
        );
        assert_eq!(
            split_image_name("a.b.c_.exr"),
            ("a.b.c_".to_owned(), "exr".to_owned())
        );
        assert_eq!(
            split_image_name("sim..bgeo.sc"),
            ("sim.".to_owned(), "bgeo.sc".to_owned())
        );
    }

    #[test]
    fn rebuilds_actual_image_names() {
        assert_eq!(actual_image_name("a.b.c..exr", 4, 12), "a.b.c.0012.exr");
        assert_eq!(actual_image_name("a.b.c_.exr", 3, -4), "a.b.c_-04.exr");
    }
}
