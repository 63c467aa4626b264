//! Console output samples.

pub const OLEDIR: &str = "\
id  |Status|Type      |Name                    |Left|Right|Child|1st Sect|Size
----+------+----------+------------------------+----+-----+-----+--------+------
0   |<Used>|Root      |Root Entry              |-   |-    |1    |3       |1344
1   |<Used>|Stream    |PROJECT                 |-   |-    |-    |0       |465
2   |<Used>|Stream    |dropper                 |-   |-    |-    |8       |1200
note: payload fetched from https://cdn.badhost.example/stage2.bin
";

pub const OLEOBJ: &str = "\
oleobj 0.60 - http://decalage.info/oletools
-------------------------------------------------------------------------------
File: 'payroll.xlsm'
extract file embedded in OLE object from stream 'ObjectPool/_1234/Ole10Native':
Parsing OLE Package
Filename = \"run.vbs\"
Source path = \"C:\\\\Users\\\\a\\\\run.vbs\"
Class = Package
saving to file payroll.xlsm_run.vbs
Embedded data: TVqQAAMAAAAEAAAA//8AALgAAAAAAAAAQAAAAAAAAAA=
";

pub const PDF_REPORT: &str = "\
============================================================
PDF keyword scan: statement.pdf
============================================================

[Results]
  Keyword         | Count      | Description
----------------------------------------------------------------------
  /JS             | 3          | JavaScript code
  /JavaScript     | 3          | JavaScript action
  /OpenAction     | 1          | Runs on open
  /AA             | 2          | Additional actions
  /ObjStm         | 5          | Compressed object streams
  /Launch         | 1          | Launches an external program

[Verdict]
  Many auto-run and script elements found. Possibly malicious.
  see http://phish.example/login for details
";

pub const PE_REPORT: &str = "\
============================================================
PE static analysis: updater.exe
============================================================

[1] Header Info
  - Entry Point: 0x1a2b0
  - Image Base:  0x400000

[2] Sections & Entropy
  Name       | Raw size   | Entropy    | Status
------------------------------------------------------------
  UPX0       | 0          | 0.0000     | normal
  UPX1       | 81920      | 7.9412     | packed?
  .rsrc      | 4096       | 4.1200     | normal

[3] Suspicious imports
  detected: VirtualAlloc              (library: KERNEL32.dll)
  detected: CreateRemoteThread        (library: KERNEL32.dll)
  detected: InternetOpenA             (library: WININET.dll)
";

pub const ZIP_REPORT: &str = "\
============================================================
ZIP structure: bundle.zip
============================================================
  - Entries: 3

[Entries]
  Name                           | Ratio    | Status
----------------------------------------------------------------------
  readme.txt                     | 2.1x     | ok
  invoice.pdf.exe                | 1.3x     | executable(.exe)
  filler.bin                     | 1029.4x  | ratio
";
