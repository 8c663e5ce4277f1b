//! Common model text fixtures for tests.

pub const EMPTY_MODEL: &str = "def model m as enddef;";

/// A small membrane model touching every kind of definition
pub const MEMBRANE_MODEL: &str = r#"
def model {membrane_model} membrane_cell as
    def import using "units.cellml" for
        unit mV using unit millivolt;
        comp stimulus using comp stimulus_protocol;
    enddef;

    def unit ms as
        unit second {pref: milli};
    enddef;

    def unit uA_per_cm2 as
        unit ampere {pref: micro};
        unit metre {pref: centi, expo: -2};
    enddef;

    def unit flux as base unit;

    def comp environment as
        var time: ms {pub: out};
    enddef;

    def comp membrane as
        def unit per_ms as
            unit ms {expo: -1};
        enddef;

        var time: ms {pub: in};
        var V: mV {init: -75, pub: out};
        var Cm: dimensionless {init: 1};
        var i_stim: uA_per_cm2 {pub: in};
        var alpha: per_ms;

        // Membrane potential
        ode(V, time) = -i_stim / Cm;
        alpha = 0.1{per_ms} * (V + 50{mV}) / (1{dimensionless} - exp(-(V + 50{mV}) / 10{mV}));
    enddef;

    def group as encapsulation for
        comp membrane incl
            comp environment;
        endcomp;
    enddef;

    def map between environment and membrane for
        vars time and time;
    enddef;
enddef;
"#;

/// Equations exercising the whole expression grammar
pub const EXPRESSION_MODEL: &str = r#"
def model expressions as
    def comp c as
        var t: second;
        var x: dimensionless;
        var y: dimensionless;
        var flag: dimensionless;

        y = sel
            case (x < 0{dimensionless}) and not (t > 1{second}): -x;
            case x >= 0{dimensionless} or t <> 2{second}: pow(x, 2{dimensionless});
            otherwise: root(x, 3{dimensionless});
        endsel;
        ode(x, t, 2{dimensionless}) = sin(pi * x) + log(x, 10{dimensionless}) - max(x, y, 1{dimensionless});
        flag = x == y xor true;
        y = x - (y - t) * x / (t + y);
    enddef;
enddef;
"#;
