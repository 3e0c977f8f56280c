use crate::die::DieSpec;
use crate::die_list::DiceList;

pub const D2: DieSpec = DieSpec::Uniform(2);
pub const D4: DieSpec = DieSpec::Uniform(4);
pub const D6: DieSpec = DieSpec::Uniform(6);
pub const D8: DieSpec = DieSpec::Uniform(8);
pub const D10: DieSpec = DieSpec::Uniform(10);
pub const D12: DieSpec = DieSpec::Uniform(12);
pub const D20: DieSpec = DieSpec::Uniform(20);
pub const D100: DieSpec = DieSpec::Uniform(100);

pub fn d2() -> DieSpec {
    D2
}

pub fn d4() -> DieSpec {
    D4
}

pub fn d6() -> DieSpec {
    D6
}

pub fn d8() -> DieSpec {
    D8
}

pub fn d10() -> DieSpec {
    D10
}

pub fn d12() -> DieSpec {
    D12
}

pub fn d20() -> DieSpec {
    D20
}

pub fn d100() -> DieSpec {
    D100
}

/// Relabelled pair with the same sum distribution as two d6.
pub fn sicherman() -> DiceList {
    DiceList::from([
        DieSpec::explicit([1, 2, 2, 3, 3, 4]),
        DieSpec::explicit([1, 3, 4, 5, 6, 8]),
    ])
}

/// Fudge die: -1, 0, +1 twice each.
pub fn fudge() -> DieSpec {
    DieSpec::explicit([-1, -1, 0, 0, 1, 1])
}
