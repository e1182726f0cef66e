//! Static HTML page shells for the rendered outputs.

/// Stylesheet for the coefficient table page.
pub const TABLE_STYLE: &str = "\
html,body {
  margin: 0;
  padding: 10px;
  font-family: monospace;
}
table {
  border-collapse: collapse;
}
tr.even {
  background-color: #ffffff;
}
tr.odd {
  background-color: #e5e5e5;
}
td {
  padding: 8px;
  border: 1px solid #000;
}
td.blank {
  border: 0;
}
td.meven {
  background-color: #008cba;
  color: white;
}
td.modd {
  background-color: #23355c;
  color: white;
}
td.m1even {
  background-color: #005470;
  color: white;
}
td.m1odd {
  background-color: #4060a6;
  color: white;
}
td.jheading {
  border: 0;
  background-color: #000014;
  color: white;
  font-weight: bold;
  text-align: center;
}
";

/// Wraps a rendered table body in the styled page shell.
pub fn table_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<style>\n{TABLE_STYLE}</style>\n</head>\n<body>\n\
         <h2>{title}</h2>\n{body}</body>\n</html>\n"
    )
}

/// Wraps LaTeX `align` lines in a MathJax page shell.
pub fn mathjax_page(latex: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n\
         <script src=\"https://polyfill.io/v3/polyfill.min.js?features=es6\"></script>\n\
         <script type=\"text/javascript\" id=\"MathJax-script\" async\n\
         \x20 src=\"https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-chtml.js\">\n\
         </script>\n</head>\n<body>\n$$\n\\begin{{align}}\n{latex}\\end{{align}}\n$$\n\
         </body>\n</html>\n"
    )
}
