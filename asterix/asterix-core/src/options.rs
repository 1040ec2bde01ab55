//! Decoder configuration.

/// How the input is divided into messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// One category octet followed by records up to the end of input.
    #[default]
    Unframed,
    /// Standard data blocks: category octet, 16-bit big-endian length
    /// (header included), records. Blocks repeat until the input ends.
    DataBlock,
}

/// How compound indicator octets select subfields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorConvention {
    /// Seven presence bits per octet, most significant first, FX excluded;
    /// presence index `n` selects subfield `n`.
    #[default]
    Presence,
    /// Only the FX slot of each octet is tested: descriptor child `j` (the
    /// indicator descriptor, when declared, being child 0) is decoded when
    /// octet `j - 1` has its FX bit set. Matches fixtures produced by older
    /// descriptor-driven decoders.
    LegacyFxSlot,
}

/// Options shared by every decode call of a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub framing: Framing,
    pub indicator: IndicatorConvention,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_indicator(mut self, indicator: IndicatorConvention) -> Self {
        self.indicator = indicator;
        self
    }
}
