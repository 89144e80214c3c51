pub mod listing;
pub mod seq_lister;
pub mod seq_split;

pub use {
    listing::{FrameInfo, ListOptions, SeqFormat},
    seq_lister::{condense_seq, expand_seq, expand_seq_strs, SeqToken},
    seq_split::{seq_split, SeqName},
};
