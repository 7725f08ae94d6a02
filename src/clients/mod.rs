pub(crate) mod lastfm;
