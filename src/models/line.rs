/// A non-owning view of a record line's two fields, split once on the
/// separator. Lives only within a single pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSplit<'a> {
    pub station: &'a [u8],
    pub temperature: &'a [u8],
}

/// An owned line split, used where an entry must cross a channel between
/// pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedLineSplit {
    pub station: Vec<u8>,
    pub temperature: Vec<u8>,
}

impl LineSplit<'_> {
    pub fn to_owned_split(&self) -> OwnedLineSplit {
        OwnedLineSplit {
            station: self.station.to_vec(),
            temperature: self.temperature.to_vec(),
        }
    }
}
