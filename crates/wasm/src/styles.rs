//! Stylesheet fragments the bridge injects at mount.

pub const CARET_STYLE: &str = "display:inline-block;width:3px;height:1em;\
    background:var(--primary);margin-left:2px;animation:blink 1s infinite;";

pub const REVEAL_AND_PROGRESS: &str = "
    .animate-in { opacity: 1 !important; transform: translateY(0) !important; }
    .scroll-progress { position: fixed; top: 0; left: 0; height: 3px; \
background: linear-gradient(90deg, var(--primary), var(--secondary)); z-index: 9999; }
";

pub const BLINK: &str = "@keyframes blink { 0%,50%{opacity:1} 51%,100%{opacity:0} }";
