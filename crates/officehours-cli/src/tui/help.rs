use indoc::indoc;

pub const HELP_TEXT: &str = indoc! {"
    h        show or hide this help
    o        open the settings file
    a        add a name to the queue
    n        next: rotate the queue
    z        undo the last rotation
    !        remove the last person in line
    $        shuffle the queue
    m        switch between group and individual meetings
    Home     show the start-of-hours message
    End      show the end-of-hours message
    k/space  pause or resume
    j        add 5 seconds
    l        take 5 seconds
    Up       add 30 seconds
    Down     take 30 seconds
    r        reset the current meeting
    d        change the meeting length
    s        save the queue now
    q        save and quit
"};
